// POST /api/{persona} handler

use bytes::Bytes;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::http::{Method, StatusCode};

use super::error::ChatError;
use crate::classification::extract_classification;
use crate::completion::CompletionProvider;
use crate::config::Persona;
use crate::conversation_log::{ConversationLogger, ConversationTurnLog};
use crate::models::{ChatReply, ChatRequest, ErrorBody};
use crate::state::AppState;

/// Logged in place of the user's text when the last message has none
pub const UNKNOWN_USER_MESSAGE: &str = "unknown";

/// Status and JSON body destined for the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl ChatResponse {
    fn ok(reply: &ChatReply) -> Self {
        Self {
            status: StatusCode::OK,
            body: serde_json::to_value(reply).unwrap_or_default(),
        }
    }

    fn error(err: &ChatError) -> Self {
        Self {
            status: err.status(),
            body: serde_json::to_value(ErrorBody::new(err.public_message())).unwrap_or_default(),
        }
    }
}

/// Relays one conversation for a single persona
///
/// Per request: complete, optionally classify, log the user turn at
/// `messages.len()`, log the assistant turn at `messages.len() + 1`, reply.
pub struct ChatHandler {
    persona: Persona,
    completion: Arc<dyn CompletionProvider>,
    logger: Arc<dyn ConversationLogger>,
}

impl ChatHandler {
    pub fn new(
        persona: Persona,
        completion: Arc<dyn CompletionProvider>,
        logger: Arc<dyn ConversationLogger>,
    ) -> Self {
        Self {
            persona,
            completion,
            logger,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Run the pipeline and shape the response. Never fails; every error
    /// becomes a status code and a generic error body.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> ChatResponse {
        let outcome = AssertUnwindSafe(self.process(method, body))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(ChatError::Unhandled(panic_message(panic))));

        match outcome {
            Ok(reply) => ChatResponse::ok(&reply),
            Err(err) => {
                match &err {
                    ChatError::MethodNotAllowed => {
                        info!(persona = %self.persona.route, %method, "rejected method")
                    }
                    ChatError::InvalidRequest(detail) => {
                        warn!(persona = %self.persona.route, %detail, "rejected request")
                    }
                    _ => error!(persona = %self.persona.route, error = %err, "chat request failed"),
                }
                ChatResponse::error(&err)
            }
        }
    }

    async fn process(&self, method: &Method, body: &[u8]) -> Result<ChatReply, ChatError> {
        if *method != Method::POST {
            return Err(ChatError::MethodNotAllowed);
        }

        let request: ChatRequest = serde_json::from_slice(body)
            .map_err(|e| ChatError::InvalidRequest(e.to_string()))?;
        let convo_id = request
            .convo_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ChatError::InvalidRequest("missing convo_id".to_string()))?;
        if request.messages.is_empty() {
            return Err(ChatError::InvalidRequest("messages is empty".to_string()));
        }

        let turn = request.messages.len();
        let bot_name = &self.persona.bot_name;

        let raw_reply = self
            .completion
            .complete(&self.persona.model, &request.messages)
            .await?;

        let (assistant_entry, reply) = if self.persona.classification_enabled {
            let extraction = extract_classification(&raw_reply);
            if let Some(e) = &extraction.parse_error {
                warn!(%convo_id, error = %e, "failed to parse classification payload");
            }
            let result = extraction.result;
            let reply = ChatReply::Classified {
                reply: result.clean_reply.clone(),
                leverage: result.leverage.clone(),
                object: result.object.clone(),
            };
            (
                ConversationTurnLog::classified(&convo_id, turn + 1, result, bot_name),
                reply,
            )
        } else {
            (
                ConversationTurnLog::assistant(&convo_id, turn + 1, &raw_reply, bot_name),
                ChatReply::Plain { reply: raw_reply },
            )
        };

        let user_message = request
            .messages
            .last()
            .and_then(|m| m.content.as_deref())
            .filter(|content| !content.is_empty())
            .unwrap_or(UNKNOWN_USER_MESSAGE);
        let user_entry = ConversationTurnLog::user(&convo_id, turn, user_message, bot_name);

        self.log_turn(&user_entry).await;
        self.log_turn(&assistant_entry).await;

        Ok(reply)
    }

    /// Log failures never reach the caller
    async fn log_turn(&self, entry: &ConversationTurnLog) {
        if let Err(e) = self.logger.log_turn(entry).await {
            warn!(
                convo_id = %entry.convo_id,
                turn = entry.turn,
                role = ?entry.role,
                error = %e,
                "failed to log conversation turn"
            );
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

/// warp entry point: dispatch to the persona registered under `route`
pub async fn chat_handler(
    route: String,
    method: Method,
    body: Bytes,
    state: Arc<AppState>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let Some(handler) = state.handler(&route) else {
        return Err(warp::reject::not_found());
    };

    info!("{} /api/{} ({} bytes)", method, route, body.len());
    let response = handler.handle(&method, &body).await;

    Ok(warp::reply::with_status(
        warp::reply::json(&response.body),
        response.status,
    ))
}
