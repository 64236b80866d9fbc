//! Provider error types.
//!
//! Every variant means the same thing to the conversation engine: "no
//! result, use the simulated reply". The detail only matters for logs.

use thiserror::Error;

/// Errors that can occur while asking an external provider for a reply.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Provider response was not the JSON shape we expected.
    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    /// Provider answered successfully but with no usable text.
    #[error("LLM returned an empty reply")]
    EmptyResponse,

    /// The last attempt hit the per-request timeout (in milliseconds).
    #[error("LLM request timed out after {0}ms")]
    Timeout(u64),

    /// Provider is not configured or not reachable.
    #[error("LLM provider unavailable: {0}")]
    Unavailable(String),

    /// Every attempt failed without a usable response.
    #[error("All LLM retry attempts exhausted after {attempts} tries: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        last_error: String,
    },
}
