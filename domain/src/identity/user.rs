//! Authenticated user entity

use super::email::Email;
use serde::{Deserialize, Serialize};

/// The user resolved by the identity lookup (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    name: String,
    email: Email,
}

impl UserIdentity {
    /// Create a user identity.
    ///
    /// A blank display name falls back to the email address so the shell
    /// always has something to greet.
    pub fn new(name: impl Into<String>, email: Email) -> Self {
        let name = name.into().trim().to_string();
        let name = if name.is_empty() {
            email.to_string()
        } else {
            name
        };
        Self { name, email }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}
