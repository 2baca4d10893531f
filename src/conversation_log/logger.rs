use async_trait::async_trait;

use super::error::Result;
use super::types::ConversationTurnLog;

/// Write-only sink for conversation turns
#[async_trait]
pub trait ConversationLogger: Send + Sync {
    /// Persist one turn. The record is never read back or updated.
    async fn log_turn(&self, entry: &ConversationTurnLog) -> Result<()>;
}
