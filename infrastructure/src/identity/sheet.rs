//! Allow-list directory read from a spreadsheet's CSV export

use async_trait::async_trait;
use nova_application::{DirectoryEntry, IdentitySource, IdentitySourceError};
use tracing::debug;

/// [`IdentitySource`] that downloads a CSV export on every fetch.
///
/// The sheet must be shared so that its export URL is readable without
/// credentials.
pub struct SheetIdentitySource {
    client: reqwest::Client,
    url: String,
    email_column: String,
    name_column: String,
}

impl SheetIdentitySource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            email_column: "email".to_string(),
            name_column: "nome_studente".to_string(),
        }
    }

    /// Override the header names to read.
    pub fn with_columns(
        mut self,
        email_column: impl Into<String>,
        name_column: impl Into<String>,
    ) -> Self {
        self.email_column = email_column.into();
        self.name_column = name_column.into();
        self
    }
}

#[async_trait]
impl IdentitySource for SheetIdentitySource {
    async fn fetch_directory(&self) -> Result<Vec<DirectoryEntry>, IdentitySourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| IdentitySourceError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentitySourceError::Http(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| IdentitySourceError::Connection(e.to_string()))?;

        let entries = parse_directory(&body, &self.email_column, &self.name_column)?;
        debug!("Fetched {} directory entries", entries.len());
        Ok(entries)
    }
}

/// Parse CSV text with a header row into directory entries.
///
/// Headers are matched trimmed and case-insensitively. Rows with a blank
/// email cell are skipped; all other values are returned as stored.
pub fn parse_directory(
    csv_text: &str,
    email_column: &str,
    name_column: &str,
) -> Result<Vec<DirectoryEntry>, IdentitySourceError> {
    let csv_text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IdentitySourceError::Malformed(e.to_string()))?
        .clone();
    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| IdentitySourceError::MissingColumn(wanted.to_string()))
    };
    let email_idx = column(email_column)?;
    let name_idx = column(name_column)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IdentitySourceError::Malformed(e.to_string()))?;
        let email = record.get(email_idx).unwrap_or_default();
        if email.trim().is_empty() {
            continue;
        }
        let name = record.get(name_idx).unwrap_or_default();
        entries.push(DirectoryEntry::new(email, name));
    }
    Ok(entries)
}
