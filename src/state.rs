// Shared, read-only application state

use std::sync::Arc;

use crate::completion::{CompletionError, CompletionProvider, OpenAiClient};
use crate::config::AppConfig;
use crate::conversation_log::{ConversationLogger, LogError, SupabaseLogClient};
use crate::handlers::ChatHandler;

/// Errors raised while wiring clients from the configuration
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Log(#[from] LogError),
}

/// One handler per persona, looked up by route segment
pub struct AppState {
    handlers: Vec<ChatHandler>,
}

impl AppState {
    pub fn new(handlers: Vec<ChatHandler>) -> Self {
        Self { handlers }
    }

    /// Build the production clients and one handler per configured persona
    pub fn from_config(config: &AppConfig) -> Result<Self, StateError> {
        let completion: Arc<dyn CompletionProvider> = Arc::new(OpenAiClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.request_timeout,
        )?);
        let logger: Arc<dyn ConversationLogger> = Arc::new(SupabaseLogClient::new(
            config.supabase_url.clone(),
            config.supabase_service_role_key.clone(),
            config.log_table.clone(),
            config.request_timeout,
        )?);

        let handlers = config
            .personas
            .iter()
            .map(|persona| ChatHandler::new(persona.clone(), completion.clone(), logger.clone()))
            .collect();

        Ok(Self::new(handlers))
    }

    pub fn handler(&self, route: &str) -> Option<&ChatHandler> {
        self.handlers.iter().find(|h| h.persona().route == route)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|h| h.persona().route.as_str())
    }
}
