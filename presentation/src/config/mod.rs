//! Presentation-level configuration
//!
//! Configuration for the chat shell.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Chat shell configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Title shown in the login banner
    pub title: String,
    /// Show a spinner while the assistant is working
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            title: "Nova Uni AI".to_string(),
            show_progress: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// History file to use: the configured one, else the platform data dir.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_dir().map(|p| p.join("nova-chat").join("history.txt")),
        }
    }
}
