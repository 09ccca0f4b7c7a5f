//! Identity Lookup use case.
//!
//! Resolves a raw email to a [`UserIdentity`]. The directory is fetched on
//! every call; there is no cache. A configured administrator email resolves
//! without touching the directory at all.

use crate::ports::identity_source::{IdentitySource, IdentitySourceError};
use nova_domain::{Email, UserIdentity};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during lookup.
///
/// The shell shows both variants as the same "email not found" message; they
/// stay separate here so operators can tell an outage from an unknown user.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Email not found: {0}")]
    NotFound(String),

    #[error("Identity source unavailable: {0}")]
    SourceUnavailable(#[from] IdentitySourceError),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}

/// Privileged account that bypasses the directory
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: Email,
    pub display_name: String,
}

impl AdminAccount {
    pub fn new(email: Email, display_name: impl Into<String>) -> Self {
        Self {
            email,
            display_name: display_name.into(),
        }
    }
}

/// Use case for resolving who is logging in.
pub struct IdentityLookupUseCase {
    source: Arc<dyn IdentitySource>,
    admin: Option<AdminAccount>,
}

impl IdentityLookupUseCase {
    pub fn new(source: Arc<dyn IdentitySource>) -> Self {
        Self {
            source,
            admin: None,
        }
    }

    pub fn with_admin(mut self, admin: Option<AdminAccount>) -> Self {
        self.admin = admin;
        self
    }

    /// Resolve `raw_email` (any case, surrounding whitespace allowed).
    pub async fn lookup(&self, raw_email: &str) -> Result<UserIdentity, LookupError> {
        let Ok(email) = Email::parse(raw_email) else {
            debug!("Rejected malformed email {:?}", raw_email);
            return Err(LookupError::NotFound(raw_email.trim().to_string()));
        };

        if let Some(admin) = &self.admin
            && admin.email == email
        {
            info!("Administrator login");
            return Ok(UserIdentity::new(admin.display_name.clone(), email));
        }

        let directory = self.source.fetch_directory().await.map_err(|e| {
            warn!("Identity source unavailable: {}", e);
            LookupError::from(e)
        })?;
        debug!("Scanning {} directory entries", directory.len());

        match directory.into_iter().find(|entry| email.matches(&entry.email)) {
            Some(entry) => {
                info!("Resolved {}", email);
                Ok(UserIdentity::new(entry.name, email))
            }
            None => {
                info!("Email {} not in directory", email);
                Err(LookupError::NotFound(email.to_string()))
            }
        }
    }
}
