//! AgriScout LLM - Farm assistant chat relay
//!
//! This crate defines the chat responder port, the HTTP adapters for the
//! remote assistant webhook and the local fallback endpoint, and the relay
//! that chains them.

pub mod extract;
pub mod models;
pub mod ports;
pub mod relay;
pub mod webhook;

pub use extract::extract_reply;
pub use models::{ChatContext, ChatReply, ChatRequest, ReplySource};
pub use ports::ChatResponder;
pub use relay::{ChatRelay, APOLOGY_REPLY};
pub use webhook::{LocalChatClient, WebhookChatClient};
