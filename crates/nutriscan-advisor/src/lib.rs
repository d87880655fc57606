//! HTTP client for the AI product-assessment service.
//!
//! Talks to an OpenRouter-compatible chat-completion endpoint. The scan flow
//! treats the assessment as strictly optional: callers decide whether to
//! invoke it at all (preferences must exist) and log-and-drop any failure.

mod client;
mod error;
mod prompt;

pub use client::{AdvisorClient, ChatMessage};
pub use error::AdvisorError;
pub use prompt::build_messages;
