//! OpenAI chat completion client

use async_trait::async_trait;
use reqwest::{Client, Request};
use std::time::Duration;
use tracing::debug;

use super::error::CompletionError;
use super::provider::CompletionProvider;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::models::ChatMessage;

/// Default base URL of the OpenAI API
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible chat completions endpoint
pub struct OpenAiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer credential
    api_key: String,
    /// API base URL, without trailing slash
    base_url: String,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer credential for the endpoint
    /// * `base_url` - API base URL (e.g., [`OPENAI_BASE_URL`])
    /// * `timeout` - Total time allowed for one completion request
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Http {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build the endpoint URL for chat completions
    fn build_endpoint_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the outbound request without sending it
    pub fn build_request(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Request, CompletionError> {
        let body = ChatCompletionRequest { model, messages };

        let request = self
            .http_client
            .post(self.build_endpoint_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .build()?;

        Ok(request)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let request = self.build_request(model, messages)?;
        debug!(model, message_count = messages.len(), "requesting completion");

        let response = self.http_client.execute(request).await?;

        // Check status
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&text)?;
        Ok(completion.into_reply())
    }
}
