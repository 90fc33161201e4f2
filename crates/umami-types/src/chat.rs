//! Chat transcript types and the `/api/chat` wire format.
//!
//! The browser and terminal clients send a [`ChatRequest`] and receive a
//! server-sent event stream: zero or more fragment events whose data is a
//! [`FragmentPayload`], then exactly one terminal event (the [`DONE_SENTINEL`]
//! or an event named [`ERROR_EVENT`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data of the terminal event on success.
pub const DONE_SENTINEL: &str = "[DONE]";

/// SSE event name of the terminal event on failure.
pub const ERROR_EVENT: &str = "error";

/// Who authored a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the visible transcript. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// A resolved (question, answer) pair sent back as conversational context.
///
/// Serializes as a two-element JSON array: `["question", "answer"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPair(pub String, pub String);

impl HistoryPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self(question.into(), answer.into())
    }

    pub fn question(&self) -> &str {
        &self.0
    }

    pub fn answer(&self) -> &str {
        &self.1
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub history: Vec<HistoryPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Data of a non-terminal SSE event: one answer fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentPayload {
    pub data: String,
}

/// Flat error body used by every HTTP error response and the `error` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// A decoded event on the client side of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFrame {
    /// An answer fragment, applied in delivery order.
    Fragment(String),
    /// The terminal sentinel; the stream is over.
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_pair_serializes_as_array() {
        let pair = HistoryPair::new("What is good?", "The ramen.");
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"["What is good?","The ramen."]"#);
        assert_eq!(pair.question(), "What is good?");
        assert_eq!(pair.answer(), "The ramen.");
    }

    #[test]
    fn test_chat_request_camel_case() {
        let json = r#"{
            "question": "Any vegan dishes?",
            "history": [["Hi", "Hello!"]],
            "id": "R1",
            "restaurantName": "Sushi Ten",
            "language": "ja"
        }"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.question, "Any vegan dishes?");
        assert_eq!(request.history, vec![HistoryPair::new("Hi", "Hello!")]);
        assert_eq!(request.id.as_deref(), Some("R1"));
        assert_eq!(request.restaurant_name.as_deref(), Some("Sushi Ten"));
        assert_eq!(request.language.as_deref(), Some("ja"));
    }

    #[test]
    fn test_chat_request_optional_fields() {
        let request: ChatRequest = serde_json::from_str(r#"{"question":"Hi"}"#).unwrap();
        assert!(request.history.is_empty());
        assert!(request.id.is_none());

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("restaurantName").is_none());
        assert_eq!(json["history"], serde_json::json!([]));
    }

    #[test]
    fn test_fragment_payload_shape() {
        let payload = FragmentPayload {
            data: "We ".to_string(),
        };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"data":"We "}"#);
    }

    #[test]
    fn test_turn_role_display() {
        assert_eq!(Turn::user("q").role.to_string(), "user");
        assert_eq!(Turn::assistant("a").role.to_string(), "assistant");
    }
}
