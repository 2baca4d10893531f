//! Chat completion request and response types
//!
//! These types map to the OpenAI chat completions schema. Only the fields the
//! relay reads are modelled; everything else in the response is ignored.

use serde::{Deserialize, Serialize};

use crate::models::ChatMessage;

/// Reply text used when the endpoint returns no usable content
pub const NO_RESPONSE_PLACEHOLDER: &str = "[No response]";

/// Request body for `POST /chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Conversation, passed through in order
    pub messages: &'a [ChatMessage],
}

/// Response body of a chat completion
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

/// A single completion choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// The message carried by a choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, or the placeholder when it is missing or empty
    pub fn into_reply(self) -> String {
        self.choices
            .into_iter()
            .flatten()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string())
    }
}
