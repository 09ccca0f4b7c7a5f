//! Identity source configuration from TOML (`[identity]` section)

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the sheet id in [`FileIdentityConfig::export_url`].
pub const SHEET_ID_PLACEHOLDER: &str = "{sheet_id}";

/// Raw identity configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityConfig {
    /// Spreadsheet holding the allow-list (usually supplied through `SHEET_ID`).
    #[serde(deserialize_with = "super::lenient_secret")]
    pub sheet_id: Option<String>,
    /// CSV export URL template; `{sheet_id}` is substituted.
    pub export_url: String,
    /// Header of the email column.
    pub email_column: String,
    /// Header of the display-name column.
    pub name_column: String,
    /// Email that logs in without a directory lookup (`ADMIN_EMAIL`).
    #[serde(deserialize_with = "super::lenient_secret")]
    pub admin_email: Option<String>,
    /// Display name given to the administrator.
    pub admin_display_name: String,
}

impl Default for FileIdentityConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            export_url: "https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv"
                .to_string(),
            email_column: "email".to_string(),
            name_column: "nome_studente".to_string(),
            admin_email: None,
            admin_display_name: "Admin".to_string(),
        }
    }
}

impl FileIdentityConfig {
    /// Export URL for the given sheet.
    pub fn export_url_for(&self, sheet_id: &str) -> String {
        self.export_url.replace(SHEET_ID_PLACEHOLDER, sheet_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url_substitutes_sheet_id() {
        let config = FileIdentityConfig::default();
        assert_eq!(
            config.export_url_for("1AbC"),
            "https://docs.google.com/spreadsheets/d/1AbC/export?format=csv"
        );
    }

    #[test]
    fn test_static_export_url_is_kept() {
        let config = FileIdentityConfig {
            export_url: "http://intranet/students.csv".to_string(),
            ..Default::default()
        };
        assert_eq!(config.export_url_for("ignored"), "http://intranet/students.csv");
    }
}
