use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// Body of a successful `POST /chat` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Session the reply belongs to.  Newly assigned when the request carried zero.
    pub session_id: SessionId,

    /// The assistant's reply.
    pub response: String,

    /// Number of messages the server now holds for this session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_length: Option<u64>,
}

impl ChatResponse {
    /// Create a new chat response.
    pub fn new(session_id: SessionId, response: impl Into<String>) -> Self {
        Self {
            session_id,
            response: response.into(),
            history_length: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_body() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"session_id": 42, "response": "hi"}"#).unwrap();
        assert_eq!(response, ChatResponse::new(SessionId::new(42), "hi"));
    }

    #[test]
    fn parses_history_length() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"response": "hi", "history_length": 4, "session_id": 3}"#,
        )
        .unwrap();
        assert_eq!(response.history_length, Some(4));
        assert_eq!(response.session_id, SessionId::new(3));
    }
}
