use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// One row of the `GET /sessions` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// The session identifier.
    pub session_id: SessionId,

    /// The first message sent in the session.
    pub prompt: String,
}
