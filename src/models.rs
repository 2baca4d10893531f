// Data structures (ChatMessage, request and reply bodies)

use serde::{Deserialize, Serialize};

// Chat Role Enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

// A single message of the conversation, as sent by the caller
//
// `content` may be missing or null (e.g. assistant turns that only carried tool calls).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: Some(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: Some(content.into()),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: Some(content.into()),
        }
    }
}

// Request Types
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub convo_id: Option<String>,
}

// Reply Types
//
// The classified shape always carries `leverage` and `object`, null when absent.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ChatReply {
    Classified {
        reply: String,
        leverage: Option<String>,
        object: Option<String>,
    },
    Plain {
        reply: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_role_serialization() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            r#""assistant""#
        );
        assert_eq!(
            serde_json::to_string(&ChatRole::System).unwrap(),
            r#""system""#
        );
    }

    #[test]
    fn test_chat_role_rejects_unknown() {
        let result = serde_json::from_str::<ChatRole>(r#""tool""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_request_deserialization() {
        let json = r#"{"messages":[{"role":"system","content":"Be kind"},{"role":"user","content":"Hi"}],"convo_id":"abc-123"}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0], ChatMessage::system("Be kind"));
        assert_eq!(request.messages[1], ChatMessage::user("Hi"));
        assert_eq!(request.convo_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_chat_message_without_content() {
        let missing: ChatMessage = serde_json::from_str(r#"{"role":"user"}"#).unwrap();
        assert_eq!(missing.content, None);

        let null: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":null}"#).unwrap();
        assert_eq!(null.content, None);

        let value = serde_json::to_value(&null).unwrap();
        assert_eq!(value, json!({"role": "assistant"}));
    }

    #[test]
    fn test_chat_request_missing_fields_default() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.messages.is_empty());
        assert!(request.convo_id.is_none());
    }

    #[test]
    fn test_classified_reply_keeps_null_fields() {
        let reply = ChatReply::Classified {
            reply: "Hello!".to_string(),
            leverage: None,
            object: Some("greeting".to_string()),
        };
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            value,
            json!({"reply": "Hello!", "leverage": null, "object": "greeting"})
        );
    }

    #[test]
    fn test_plain_reply_serialization() {
        let reply = ChatReply::Plain {
            reply: "Hello!".to_string(),
        };
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value, json!({"reply": "Hello!"}));
    }

    #[test]
    fn test_error_body_serialization() {
        let value = serde_json::to_value(ErrorBody::new("Method not allowed")).unwrap();
        assert_eq!(value, json!({"error": "Method not allowed"}));
    }
}
