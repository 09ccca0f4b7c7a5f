//! Identity source port
//!
//! A read-only directory of allowed users, fetched whole on every lookup.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while reading the directory
#[derive(Error, Debug)]
pub enum IdentitySourceError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Directory request failed with HTTP {0}")]
    Http(u16),

    #[error("Missing column '{0}' in directory")]
    MissingColumn(String),

    #[error("Malformed directory: {0}")]
    Malformed(String),
}

/// One row of the directory, exactly as stored (not normalized)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub email: String,
    pub name: String,
}

impl DirectoryEntry {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Source of allowed users
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Fetch a full snapshot of the directory, in source order
    async fn fetch_directory(&self) -> Result<Vec<DirectoryEntry>, IdentitySourceError>;
}
