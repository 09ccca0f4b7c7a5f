//! Conversation log configuration from TOML (`[log]` section)

use serde::{Deserialize, Serialize};

/// Raw conversation log configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Append every exchange to the CSV log
    pub enabled: bool,
    /// Path of the CSV file
    pub path: String,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "chat_logs.csv".to_string(),
        }
    }
}
