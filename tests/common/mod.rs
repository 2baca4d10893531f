#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use chat_relay::completion::{CompletionError, CompletionProvider};
use chat_relay::config::Persona;
use chat_relay::conversation_log::{ConversationLogger, ConversationTurnLog, LogError};
use chat_relay::handlers::ChatHandler;
use chat_relay::models::ChatMessage;

/// What the fake completion endpoint does when called
pub enum Behavior {
    Reply(String),
    Fail,
    Panic,
}

/// Completion provider that records every call
pub struct FakeCompletion {
    behavior: Behavior,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl FakeCompletion {
    pub fn replying(reply: &str) -> Arc<Self> {
        Self::with(Behavior::Reply(reply.to_string()))
    }

    pub fn with(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletion {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        match &self.behavior {
            Behavior::Reply(reply) => Ok(reply.clone()),
            Behavior::Fail => Err(CompletionError::Http {
                status: 503,
                body: "upstream unavailable".to_string(),
            }),
            Behavior::Panic => panic!("completion exploded"),
        }
    }
}

/// Logger that keeps entries in memory, optionally failing every write
pub struct RecordingLogger {
    fail: bool,
    entries: Mutex<Vec<ConversationTurnLog>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            entries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            entries: Mutex::new(Vec::new()),
        })
    }

    pub fn entries(&self) -> Vec<ConversationTurnLog> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversationLogger for RecordingLogger {
    async fn log_turn(&self, entry: &ConversationTurnLog) -> Result<(), LogError> {
        self.entries.lock().unwrap().push(entry.clone());
        if self.fail {
            return Err(LogError::Http {
                status: 500,
                body: "store down".to_string(),
            });
        }
        Ok(())
    }
}

pub fn classifier_persona() -> Persona {
    Persona::classifier("gpt-5-nano", "Noah")
}

pub fn plain_persona() -> Persona {
    Persona::plain("gpt-4o-mini", "Emma")
}

pub fn build_handler(
    persona: Persona,
    completion: Arc<FakeCompletion>,
    logger: Arc<RecordingLogger>,
) -> ChatHandler {
    ChatHandler::new(persona, completion, logger)
}

/// Request body with `n` alternating messages, ending with a user message
pub fn conversation_body(convo_id: &str, n: usize) -> Vec<u8> {
    let messages: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            let role = if (n - 1 - i) % 2 == 0 { "user" } else { "assistant" };
            serde_json::json!({"role": role, "content": format!("message {}", i + 1)})
        })
        .collect();
    serde_json::to_vec(&serde_json::json!({"messages": messages, "convo_id": convo_id})).unwrap()
}
