//! Chat application module for talking to the Chapka service.
//!
//! This module provides the state behind the chat screen and the pieces the
//! `chapka-chat` REPL is built from:
//!
//! - [`view`]: the chat view, its transcript and its two actions
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: slash command parsing
//! - [`render`]: output rendering

mod commands;
mod config;
mod render;
mod view;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{PlainTextRenderer, Renderer};
pub use view::{ChatView, UNREACHABLE_SERVER_MESSAGE};
