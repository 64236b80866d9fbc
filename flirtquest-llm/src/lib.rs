//! # flirtquest-llm: External Reply Providers
//!
//! The conversation engine can hand the chat history to a remote text
//! model instead of using its templated replies. This crate holds that
//! seam:
//!
//!   - [`ReplyProvider`]: the capability the engine consumes
//!   - [`LlmClient`]: an implementation over HTTP, speaking either the
//!     OpenAI-compatible chat API or Ollama's chat API
//!   - [`prompt`]: the character system prompt
//!
//! Any failure (no key, network error, timeout, bad JSON, blank text) is an
//! `Err`, and the engine's answer to every `Err` is the same: fall back to
//! the simulated reply.

pub mod client;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod types;

pub use client::{LlmClient, LlmProvider};
pub use error::LlmError;
pub use provider::ReplyProvider;
pub use types::{ChatMessage, ChatRole, ReplyRequest};
