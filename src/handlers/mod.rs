// Handlers module

pub mod chat;
pub mod error;

pub use chat::{chat_handler, ChatHandler, ChatResponse, UNKNOWN_USER_MESSAGE};
pub use error::ChatError;
