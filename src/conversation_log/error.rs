use thiserror::Error;

/// Result type for log store operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Error types for log store writes
#[derive(Debug, Error)]
pub enum LogError {
    /// Transport failures and non-2xx responses (status 0 when no response arrived)
    #[error("Log store HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// The record or request could not be encoded
    #[error("Log store serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for LogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return LogError::Serialization(err.to_string());
        }
        LogError::Http {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}
