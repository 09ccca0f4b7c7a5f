//! Infrastructure layer for nova-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod identity;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileAssistantConfig, FileConfig, FileIdentityConfig,
    FileLogConfig, FileUiConfig, Secrets,
};
pub use identity::{SheetIdentitySource, parse_directory};
pub use logging::CsvConversationLog;
pub use openai::{OpenAiAssistantBackend, OpenAiError};
