// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod observability;
pub mod types;

// Re-exports
pub use client::{ChatBackend, Chapka};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use types::*;
