//! Email value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A normalized email address (Value Object)
///
/// Normalization trims surrounding whitespace and lowercases the whole
/// address, so `" User@X.com "` and `"user@x.com"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse and normalize a raw email string.
    ///
    /// Only the shape `local@domain` is checked; deliverability is the
    /// identity source's business.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = Self::normalize(raw);
        match normalized.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(normalized))
            }
            _ => Err(DomainError::InvalidEmail(raw.to_string())),
        }
    }

    /// Trim and lowercase without validating.
    ///
    /// Used to normalize cells read from the identity source.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Whether a raw (unnormalized) cell refers to this address.
    pub fn matches(&self, raw: &str) -> bool {
        Self::normalize(raw) == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::str::FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::parse(s)
    }
}
