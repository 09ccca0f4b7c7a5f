//! Assistant backend configuration from TOML (`[assistant]` section)

use nova_application::PollingParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw assistant configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssistantConfig {
    /// API key (usually supplied through `OPENAI_API_KEY`).
    #[serde(deserialize_with = "super::lenient_secret")]
    pub api_key: Option<String>,
    /// Assistant to run on every turn (usually supplied through `ASSISTANT_ID`).
    #[serde(deserialize_with = "super::lenient_secret")]
    pub assistant_id: Option<String>,
    /// Base URL of the assistants API.
    pub base_url: String,
    /// Pause before each run status check, in milliseconds.
    pub poll_interval_ms: u64,
    /// Status checks before a run is reported as timed out.
    pub max_poll_attempts: u32,
    /// Timeout of a single HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for FileAssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            base_url: "https://api.openai.com/v1".to_string(),
            poll_interval_ms: 500,
            max_poll_attempts: 60,
            request_timeout_secs: 30,
        }
    }
}

impl FileAssistantConfig {
    pub fn polling_params(&self) -> PollingParams {
        PollingParams::default()
            .with_interval(Duration::from_millis(self.poll_interval_ms))
            .with_max_attempts(self.max_poll_attempts)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
