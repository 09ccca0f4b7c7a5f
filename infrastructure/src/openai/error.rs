//! Error types for the OpenAI assistants adapter

use nova_application::BackendError;
use thiserror::Error;

/// Result type alias for OpenAI operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when calling the assistants API
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },
}

impl From<OpenAiError> for BackendError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Http(e) => BackendError::Connection(e.to_string()),
            OpenAiError::Api { status, message } => BackendError::Api { status, message },
            OpenAiError::ParseError { error, .. } => BackendError::UnexpectedResponse(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_to_backend_api() {
        let err: BackendError = OpenAiError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        }
        .into();
        assert!(matches!(err, BackendError::Api { status: 401, .. }));
    }

    #[test]
    fn test_parse_error_drops_raw_body() {
        let err: BackendError = OpenAiError::ParseError {
            error: "missing field `id`".to_string(),
            raw: "{\"secret\":true}".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Unexpected response: missing field `id`"
        );
    }
}
