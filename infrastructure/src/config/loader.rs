//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const PROJECT_FILES: [&str; 2] = ["nova.toml", ".nova.toml"];

/// Secret variables read verbatim from the environment, and the config key
/// each one fills.
const SECRET_ENV: [(&str, &str); 4] = [
    ("OPENAI_API_KEY", "assistant.api_key"),
    ("ASSISTANT_ID", "assistant.assistant_id"),
    ("SHEET_ID", "identity.sheet_id"),
    ("ADMIN_EMAIL", "identity.admin_email"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Secret variables (`OPENAI_API_KEY`, `ASSISTANT_ID`, `SHEET_ID`, `ADMIN_EMAIL`)
    /// 2. `NOVA_`-prefixed variables, `__` separating sections
    ///    (e.g. `NOVA_ASSISTANT__MAX_POLL_ATTEMPTS=90`)
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./nova.toml` or `./.nova.toml`
    /// 5. Global: `~/.config/nova-chat/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        let figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Secret variables are merged verbatim as strings, so all-digit ids and
    /// leading zeros survive.
    fn with_env(figment: Figment) -> Figment {
        let figment = figment.merge(Env::prefixed("NOVA_").split("__"));
        SECRET_ENV
            .iter()
            .fold(figment, |figment, (name, key)| match std::env::var(name) {
                Ok(value) => figment.merge(Serialized::default(key, value)),
                Err(_) => figment,
            })
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("nova-chat").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Render the effective configuration as TOML with secrets hidden
    pub fn render(config: &FileConfig) -> String {
        toml::to_string_pretty(&config.redacted())
            .unwrap_or_else(|e| format!("# could not render configuration: {}", e))
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] OPENAI_API_KEY, ASSISTANT_ID, SHEET_ID, ADMIN_EMAIL");
        println!("  [ENV  ] NOVA_<SECTION>__<KEY>");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./nova.toml or ./.nova.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("nova-chat"));
    }

    #[test]
    fn test_secrets_from_original_env_names() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("OPENAI_API_KEY", "sk-test");
            jail.set_env("ASSISTANT_ID", "asst_123");
            jail.set_env("SHEET_ID", "sheet-abc");
            jail.set_env("ADMIN_EMAIL", "dean@nova.edu");

            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            let secrets = config.secrets().expect("all secrets set");

            assert_eq!(secrets.api_key, "sk-test");
            assert_eq!(secrets.assistant_id, "asst_123");
            assert_eq!(secrets.sheet_id, "sheet-abc");
            assert_eq!(secrets.admin_email.as_deref(), Some("dean@nova.edu"));
            Ok(())
        });
    }

    #[test]
    fn test_project_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "nova.toml",
                r#"
[assistant]
assistant_id = "asst_file"
max_poll_attempts = 10

[ui]
title = "From File"
"#,
            )?;
            jail.set_env("NOVA_ASSISTANT__MAX_POLL_ATTEMPTS", "90");
            jail.set_env("ASSISTANT_ID", "asst_env");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;

            assert_eq!(config.ui.title, "From File");
            assert_eq!(config.assistant.max_poll_attempts, 90);
            assert_eq!(config.assistant.assistant_id.as_deref(), Some("asst_env"));
            assert_eq!(config.assistant.poll_interval_ms, 500);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("nova.toml", "[log]\npath = \"project.csv\"\n")?;
            jail.create_file("custom.toml", "[log]\npath = \"custom.csv\"\n")?;

            let explicit = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;

            assert_eq!(config.log.path, "custom.csv");
            Ok(())
        });
    }

    #[test]
    fn test_render_hides_api_key() {
        let mut config = FileConfig::default();
        config.assistant.api_key = Some("sk-very-secret".to_string());
        let rendered = ConfigLoader::render(&config);
        assert!(rendered.contains("[assistant]"));
        assert!(!rendered.contains("sk-very-secret"));
    }

    #[test]
    fn test_numeric_secrets_load_as_text() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("OPENAI_API_KEY", "123456789");
            jail.set_env("ASSISTANT_ID", "42");
            jail.set_env("SHEET_ID", "00123456");

            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            let secrets = config.secrets().expect("numeric secrets accepted");

            assert_eq!(secrets.api_key, "123456789");
            assert_eq!(secrets.assistant_id, "42");
            assert_eq!(secrets.sheet_id, "00123456");
            Ok(())
        });
    }

    #[test]
    fn test_numeric_prefixed_secret_loads_as_text() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("NOVA_IDENTITY__SHEET_ID", "123456");

            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;

            assert_eq!(config.identity.sheet_id.as_deref(), Some("123456"));
            Ok(())
        });
    }
}
