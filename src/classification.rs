//! Extraction of the classification payload appended to assistant replies
//!
//! A classified reply looks like `Free text...[CLASSIFICATION]{"leverage":"...","object":"..."}`.
//! Everything here is pure: parse failures are returned as data and the caller decides
//! how to report them.

use serde_json::Value;
use thiserror::Error;

/// Literal separating the user-facing reply from the structured payload
pub const CLASSIFICATION_MARKER: &str = "[CLASSIFICATION]";

/// Reply text with the classification fields split out
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationResult {
    pub clean_reply: String,
    pub leverage: Option<String>,
    pub object: Option<String>,
}

impl ClassificationResult {
    fn unclassified(clean_reply: impl Into<String>) -> Self {
        Self {
            clean_reply: clean_reply.into(),
            leverage: None,
            object: None,
        }
    }
}

/// Why a payload after the marker was rejected
#[derive(Debug, Error)]
pub enum ClassificationParseError {
    #[error("invalid classification JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("classification payload is not an object")]
    NotAnObject,
}

/// Outcome of running the extractor over one reply
#[derive(Debug)]
pub struct Extraction {
    pub result: ClassificationResult,
    /// Set when the marker was found but the payload could not be decoded
    pub parse_error: Option<ClassificationParseError>,
}

/// Split a reply into its clean text and classification fields.
///
/// Without the marker the reply is returned untouched. With the marker, the text
/// before it is trimmed and the payload after it is decoded as a JSON object.
/// Each field is read on its own: `null`, `false`, `0` and `""` become `None`,
/// other non-string values are kept in their JSON text form. A payload that is
/// not a JSON object still yields the trimmed text.
///
/// # Examples
///
/// ```
/// use chat_relay::classification::extract_classification;
///
/// let extraction = extract_classification(
///     r#"Hello! [CLASSIFICATION] {"leverage":"rapport","object":""}"#,
/// );
/// assert_eq!(extraction.result.clean_reply, "Hello!");
/// assert_eq!(extraction.result.leverage.as_deref(), Some("rapport"));
/// assert_eq!(extraction.result.object, None);
/// assert!(extraction.parse_error.is_none());
///
/// let extraction = extract_classification("No marker here ");
/// assert_eq!(extraction.result.clean_reply, "No marker here ");
/// ```
pub fn extract_classification(reply: &str) -> Extraction {
    let Some(idx) = reply.find(CLASSIFICATION_MARKER) else {
        return Extraction {
            result: ClassificationResult::unclassified(reply),
            parse_error: None,
        };
    };

    let clean_reply = reply[..idx].trim();
    let payload = reply[idx + CLASSIFICATION_MARKER.len()..].trim();

    match parse_payload(payload) {
        Ok((leverage, object)) => Extraction {
            result: ClassificationResult {
                clean_reply: clean_reply.to_string(),
                leverage,
                object,
            },
            parse_error: None,
        },
        Err(e) => Extraction {
            result: ClassificationResult::unclassified(clean_reply),
            parse_error: Some(e),
        },
    }
}

type Fields = (Option<String>, Option<String>);

fn parse_payload(payload: &str) -> Result<Fields, ClassificationParseError> {
    let value: Value = serde_json::from_str(payload)?;
    let fields = value
        .as_object()
        .ok_or(ClassificationParseError::NotAnObject)?;

    Ok((
        fields.get("leverage").and_then(field_text),
        fields.get("object").and_then(field_text),
    ))
}

/// Text of a truthy field value
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
