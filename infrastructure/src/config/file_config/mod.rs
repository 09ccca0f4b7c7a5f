//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Secrets may live in the file but are normally injected from the
//! environment by the [`ConfigLoader`](super::ConfigLoader).

mod assistant;
mod identity;
mod log;
mod ui;

pub use assistant::FileAssistantConfig;
pub use identity::{FileIdentityConfig, SHEET_ID_PLACEHOLDER};
pub use log::FileLogConfig;
pub use ui::FileUiConfig;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Read an optional secret, accepting numbers as well as strings.
///
/// Environment values and TOML scalars like `123456` arrive as integers.
pub(crate) fn lenient_secret<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    }))
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Assistant backend settings
    pub assistant: FileAssistantConfig,
    /// Allow-list settings
    pub identity: FileIdentityConfig,
    /// Conversation log settings
    pub log: FileLogConfig,
    /// Shell settings
    pub ui: FileUiConfig,
}

/// Errors raised while validating a loaded configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required secret {env} (or `{key}` in the config file)")]
    Missing {
        key: &'static str,
        env: &'static str,
    },
}

/// Secrets required to start, validated once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub api_key: String,
    pub assistant_id: String,
    pub sheet_id: String,
    pub admin_email: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("api_key", &"<redacted>")
            .field("assistant_id", &self.assistant_id)
            .field("sheet_id", &self.sheet_id)
            .field("admin_email", &self.admin_email)
            .finish()
    }
}

fn required(
    value: &Option<String>,
    key: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::Missing { key, env }),
    }
}

impl FileConfig {
    /// Extract the startup secrets; the first missing one is reported.
    pub fn secrets(&self) -> Result<Secrets, ConfigError> {
        Ok(Secrets {
            api_key: required(&self.assistant.api_key, "assistant.api_key", "OPENAI_API_KEY")?,
            assistant_id: required(
                &self.assistant.assistant_id,
                "assistant.assistant_id",
                "ASSISTANT_ID",
            )?,
            sheet_id: required(&self.identity.sheet_id, "identity.sheet_id", "SHEET_ID")?,
            admin_email: self
                .identity
                .admin_email
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        })
    }

    /// Copy of the configuration that is safe to print.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.assistant.api_key.is_some() {
            config.assistant.api_key = Some("<redacted>".to_string());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[assistant]
assistant_id = "asst_abc"
poll_interval_ms = 1000
max_poll_attempts = 20

[identity]
sheet_id = "sheet123"
name_column = "name"
admin_email = "dean@nova.edu"

[log]
enabled = false

[ui]
title = "Campus Helper"
show_progress = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.assistant.assistant_id.as_deref(), Some("asst_abc"));
        assert_eq!(config.assistant.max_poll_attempts, 20);
        assert_eq!(config.identity.name_column, "name");
        assert_eq!(config.identity.email_column, "email");
        assert!(!config.log.enabled);
        assert_eq!(config.ui.title, "Campus Helper");
        assert!(!config.ui.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.assistant.api_key.is_none());
        assert_eq!(config.assistant.base_url, "https://api.openai.com/v1");
        assert!(config.log.enabled);
        assert_eq!(config.log.path, "chat_logs.csv");
        assert_eq!(config.ui.title, "Nova Uni AI");
    }

    #[test]
    fn test_missing_secret_is_reported() {
        let config = FileConfig::default();
        assert_eq!(
            config.secrets().unwrap_err(),
            ConfigError::Missing {
                key: "assistant.api_key",
                env: "OPENAI_API_KEY"
            }
        );
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let mut config = FileConfig::default();
        config.assistant.api_key = Some("sk-test".to_string());
        config.assistant.assistant_id = Some("asst_1".to_string());
        config.identity.sheet_id = Some("   ".to_string());

        let err = config.secrets().unwrap_err();
        assert_eq!(err.to_string(), "Missing required secret SHEET_ID (or `identity.sheet_id` in the config file)");
    }

    #[test]
    fn test_secrets_with_optional_admin() {
        let mut config = FileConfig::default();
        config.assistant.api_key = Some("sk-test".to_string());
        config.assistant.assistant_id = Some("asst_1".to_string());
        config.identity.sheet_id = Some("sheet".to_string());
        config.identity.admin_email = Some("".to_string());

        let secrets = config.secrets().unwrap();
        assert_eq!(secrets.api_key, "sk-test");
        assert!(secrets.admin_email.is_none());
        assert!(!format!("{:?}", secrets).contains("sk-test"));
    }

    #[test]
    fn test_redacted_hides_api_key() {
        let mut config = FileConfig::default();
        config.assistant.api_key = Some("sk-secret".to_string());
        let printed = toml::to_string(&config.redacted()).unwrap();
        assert!(!printed.contains("sk-secret"));
    }

    #[test]
    fn test_numeric_secret_in_toml_is_text() {
        let config: FileConfig = toml::from_str("[identity]\nsheet_id = 123456\n").unwrap();
        assert_eq!(config.identity.sheet_id.as_deref(), Some("123456"));
    }
}
