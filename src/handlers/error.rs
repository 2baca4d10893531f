//! Error taxonomy of the chat pipeline

use thiserror::Error;
use warp::http::StatusCode;

use crate::completion::CompletionError;

/// Failures that end a request early
///
/// Classification parse failures and log store failures are not listed: they
/// are reported and swallowed inside the pipeline.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Unhandled failure: {0}")]
    Unhandled(String),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ChatError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ChatError::Completion(_) | ChatError::Unhandled(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the caller; internal detail stays in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            ChatError::MethodNotAllowed => "Method not allowed",
            ChatError::InvalidRequest(_) => "Invalid request",
            ChatError::Completion(_) | ChatError::Unhandled(_) => "Something went wrong",
        }
    }
}
