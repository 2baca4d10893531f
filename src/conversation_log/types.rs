use serde::{Deserialize, Serialize};

use crate::classification::ClassificationResult;

/// Role recorded for a logged turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One row of the log table
///
/// `leverage` and `object` are always serialized, as null when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurnLog {
    pub convo_id: String,
    pub turn: usize,
    pub role: TurnRole,
    pub message: String,
    pub bot_name: String,
    pub leverage: Option<String>,
    pub object: Option<String>,
}

impl ConversationTurnLog {
    /// Create a user turn
    pub fn user(
        convo_id: impl Into<String>,
        turn: usize,
        message: impl Into<String>,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            convo_id: convo_id.into(),
            turn,
            role: TurnRole::User,
            message: message.into(),
            bot_name: bot_name.into(),
            leverage: None,
            object: None,
        }
    }

    /// Create an assistant turn without classification fields
    pub fn assistant(
        convo_id: impl Into<String>,
        turn: usize,
        message: impl Into<String>,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            role: TurnRole::Assistant,
            ..Self::user(convo_id, turn, message, bot_name)
        }
    }

    /// Create an assistant turn from an extracted reply
    pub fn classified(
        convo_id: impl Into<String>,
        turn: usize,
        classification: ClassificationResult,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            leverage: classification.leverage,
            object: classification.object,
            ..Self::assistant(convo_id, turn, classification.clean_reply, bot_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_turn_serialization() {
        let entry = ConversationTurnLog::user("c-1", 1, "Hi", "Noah");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "convo_id": "c-1",
                "turn": 1,
                "role": "user",
                "message": "Hi",
                "bot_name": "Noah",
                "leverage": null,
                "object": null
            })
        );
    }

    #[test]
    fn test_classified_turn_carries_fields() {
        let classification = ClassificationResult {
            clean_reply: "Hello!".to_string(),
            leverage: Some("rapport".to_string()),
            object: None,
        };
        let entry = ConversationTurnLog::classified("c-1", 2, classification, "Noah");
        assert_eq!(entry.role, TurnRole::Assistant);
        assert_eq!(entry.turn, 2);
        assert_eq!(entry.message, "Hello!");
        assert_eq!(entry.leverage.as_deref(), Some("rapport"));
        assert_eq!(entry.object, None);
    }

    #[test]
    fn test_turn_role_serialization() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&TurnRole::Assistant).unwrap(),
            r#""assistant""#
        );
    }
}
