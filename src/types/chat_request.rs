use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// Body of a `POST /chat` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Session to continue, or zero to have the server open a new one.
    pub session_id: SessionId,

    /// The user's message.
    pub message: String,
}

impl ChatRequest {
    /// Create a new chat request.
    pub fn new(session_id: SessionId, message: impl Into<String>) -> Self {
        Self {
            session_id,
            message: message.into(),
        }
    }
}
