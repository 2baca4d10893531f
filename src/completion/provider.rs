//! Provider trait for completion backends

use async_trait::async_trait;

use super::error::CompletionError;
use crate::models::ChatMessage;

/// Interface the request handler uses to obtain a reply
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `messages` to `model` and return the text of the first choice.
    ///
    /// A response without any choice or content yields
    /// [`NO_RESPONSE_PLACEHOLDER`](super::types::NO_RESPONSE_PLACEHOLDER) instead of an error.
    /// Implementations do not retry.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError>;
}
