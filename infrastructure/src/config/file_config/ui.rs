//! Shell configuration from TOML (`[ui]` section)

use serde::{Deserialize, Serialize};

/// Raw shell configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUiConfig {
    /// Title shown on the login screen and chat header
    pub title: String,
    /// Show a spinner while the assistant is working
    pub show_progress: bool,
    /// Enable colored terminal output
    pub color: bool,
    /// Path to the input history file
    pub history_file: Option<String>,
}

impl Default for FileUiConfig {
    fn default() -> Self {
        Self {
            title: "Nova Uni AI".to_string(),
            show_progress: true,
            color: true,
            history_file: None,
        }
    }
}
