//! Conversation logger
//!
//! Persists every conversation turn to a PostgREST-style log store
//! (Supabase `rest/v1`). The store acknowledges writes with no body.

pub mod client;
pub mod error;
pub mod logger;
pub mod types;

pub use client::{SupabaseLogClient, DEFAULT_LOG_TABLE};
pub use error::{LogError, Result};
pub use logger::ConversationLogger;
pub use types::{ConversationTurnLog, TurnRole};
