//! Configuration loading for nova-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Secret environment variables (`OPENAI_API_KEY`, `ASSISTANT_ID`, `SHEET_ID`, `ADMIN_EMAIL`)
//! 2. `NOVA_`-prefixed environment variables
//! 3. `--config <path>` specified file
//! 4. Project root: `./nova.toml` or `./.nova.toml`
//! 5. Global: `~/.config/nova-chat/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileAssistantConfig, FileConfig, FileIdentityConfig, FileLogConfig,
    FileUiConfig, SHEET_ID_PLACEHOLDER, Secrets,
};
pub use loader::ConfigLoader;
