//! Interactive chat module
//!
//! Provides a readline-based login and chat shell.

mod repl;

pub use repl::{ChatRepl, ShellCommand};
