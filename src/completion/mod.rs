//! Completion client
//!
//! Sends a conversation to an OpenAI-compatible chat completion endpoint and
//! returns the text of the first choice.

pub mod client;
pub mod error;
pub mod provider;
pub mod types;

// Re-export commonly used types
pub use client::{OpenAiClient, OPENAI_BASE_URL};
pub use error::CompletionError;
pub use provider::CompletionProvider;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, NO_RESPONSE_PLACEHOLDER};
