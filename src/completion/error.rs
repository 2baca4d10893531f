//! Error types for the completion client

use thiserror::Error;

/// Errors that can occur when requesting a completion
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Transport failures and non-2xx responses (status 0 when no response arrived)
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<serde_json::Error> for CompletionError {
    fn from(err: serde_json::Error) -> Self {
        CompletionError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return CompletionError::Serialization(err.to_string());
        }
        if err.is_builder() {
            return CompletionError::InvalidRequest(err.to_string());
        }
        CompletionError::Http {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}
