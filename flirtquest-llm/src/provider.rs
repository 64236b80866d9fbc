//! The capability the conversation engine consumes.

use std::future::Future;

use crate::error::LlmError;
use crate::types::ReplyRequest;

/// Something that can write the character's next line.
///
/// Any `Err`, and any blank reply, is treated by the caller as "no
/// result"; implementations should not retry forever or panic on bad input.
pub trait ReplyProvider: Send + Sync {
    /// Produce a reply for the given history.
    fn complete(
        &self,
        request: &ReplyRequest,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;

    /// Whether calling [`complete`](Self::complete) can ever succeed.
    fn is_available(&self) -> bool {
        true
    }
}
