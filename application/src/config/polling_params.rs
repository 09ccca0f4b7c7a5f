//! Polling parameters: run wait loop control.
//!
//! [`PollingParams`] bounds how long the
//! [`AssistantSessionDriver`](crate::use_cases::submit_turn::AssistantSessionDriver)
//! waits for a backend run: a fixed pause before every status check and a
//! hard cap on the number of checks.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Run polling control parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingParams {
    /// Pause before each status check.
    pub interval: Duration,
    /// Maximum number of status checks before giving up.
    pub max_attempts: u32,
}

impl Default for PollingParams {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_attempts: 60,
        }
    }
}

impl PollingParams {
    // ==================== Builder Methods ====================

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Upper bound on the time spent sleeping between checks.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_is_thirty_seconds() {
        let params = PollingParams::default();
        assert_eq!(params.interval, Duration::from_millis(500));
        assert_eq!(params.max_attempts, 60);
        assert_eq!(params.budget(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_methods() {
        let params = PollingParams::default()
            .with_interval(Duration::from_millis(100))
            .with_max_attempts(5);
        assert_eq!(params.budget(), Duration::from_millis(500));
    }
}
