//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Session is not authenticated")]
    NotAuthenticated,
}

impl DomainError {
    /// Check if this error comes from a logged-out session
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, DomainError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_email_display() {
        let error = DomainError::InvalidEmail("nope".to_string());
        assert_eq!(error.to_string(), "Invalid email: \"nope\"");
    }

    #[test]
    fn test_is_not_authenticated_check() {
        assert!(DomainError::NotAuthenticated.is_not_authenticated());
        assert!(!DomainError::EmptyMessage.is_not_authenticated());
    }
}
