// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod history_entry;
pub mod message;
pub mod session_id;
pub mod session_summary;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use history_entry::HistoryEntry;
pub use message::{Message, Role};
pub use session_id::SessionId;
pub use session_summary::SessionSummary;
