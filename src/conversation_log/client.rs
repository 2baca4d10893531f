use async_trait::async_trait;
use reqwest::{Client, Request};
use std::time::Duration;
use tracing::debug;

use super::error::{LogError, Result};
use super::logger::ConversationLogger;
use super::types::ConversationTurnLog;

/// Table the turns are written to unless configured otherwise
pub const DEFAULT_LOG_TABLE: &str = "logs";

/// Log store client speaking the Supabase REST interface
pub struct SupabaseLogClient {
    http_client: Client,
    /// Project URL, without trailing slash
    base_url: String,
    /// Service-level credential, sent both as `apikey` and bearer token
    service_key: String,
    table: String,
}

impl SupabaseLogClient {
    /// Create a new log client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
        table: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .map_err(|e| LogError::Http {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            table: table.into(),
        })
    }

    fn build_endpoint_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Build the record-creation request without sending it
    pub fn build_request(&self, entry: &ConversationTurnLog) -> Result<Request> {
        let request = self
            .http_client
            .post(self.build_endpoint_url())
            .header("Content-Type", "application/json")
            .header("apikey", self.service_key.as_str())
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "return=minimal")
            .json(entry)
            .build()?;

        Ok(request)
    }
}

#[async_trait]
impl ConversationLogger for SupabaseLogClient {
    async fn log_turn(&self, entry: &ConversationTurnLog) -> Result<()> {
        let request = self.build_request(entry)?;
        debug!(
            convo_id = %entry.convo_id,
            turn = entry.turn,
            role = ?entry.role,
            "writing conversation turn"
        );

        let response = self.http_client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(LogError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SupabaseLogClient {
        SupabaseLogClient::new(
            base_url,
            "service-role-key",
            DEFAULT_LOG_TABLE,
            Duration::from_secs(10),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_url_tolerates_trailing_slash() {
        let client = test_client("https://project.supabase.co/");
        assert_eq!(
            client.build_endpoint_url(),
            "https://project.supabase.co/rest/v1/logs"
        );
    }

    #[test]
    fn test_build_request_headers() {
        let client = test_client("https://project.supabase.co");
        let entry = ConversationTurnLog::user("c-1", 1, "Hi", "Noah");
        let request = client.build_request(&entry).unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/rest/v1/logs"
        );
        let headers = request.headers();
        assert_eq!(headers["apikey"], "service-role-key");
        assert_eq!(headers["authorization"], "Bearer service-role-key");
        assert_eq!(headers["prefer"], "return=minimal");
        assert_eq!(headers["content-type"], "application/json");
    }

    #[test]
    fn test_build_request_body() {
        let client = test_client("https://project.supabase.co");
        let mut entry = ConversationTurnLog::assistant("c-1", 2, "Hello!", "Noah");
        entry.leverage = Some("rapport".to_string());
        let request = client.build_request(&entry).unwrap();

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(value["convo_id"], "c-1");
        assert_eq!(value["turn"], 2);
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["message"], "Hello!");
        assert_eq!(value["bot_name"], "Noah");
        assert_eq!(value["leverage"], "rapport");
        assert!(value["object"].is_null());
        assert!(value.as_object().unwrap().contains_key("object"));
    }
}
