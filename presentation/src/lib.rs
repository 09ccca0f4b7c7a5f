//! Presentation layer for nova-chat
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive chat shell.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ShellCommand};
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::SpinnerProgress;
