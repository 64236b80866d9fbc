//! Error types for the FlirtQuest conversation engine.

use thiserror::Error;

/// Top-level error type for engine and session operations.
///
/// None of these are fatal to a session: after any of them the conversation
/// is still in a state that accepts the next turn.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A turn is already awaiting its reply; the submission was dropped.
    #[error("A turn is already in progress")]
    Busy,

    /// The player message was blank after trimming.
    #[error("Message is empty")]
    EmptyMessage,

    /// A scene name that is not in the scene catalog.
    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    /// A personality name that is not in the personality catalog.
    #[error("Unknown personality: {0}")]
    UnknownPersonality(String),

    /// The task finishing a turn was cancelled, which only happens when the
    /// runtime shuts down.
    #[error("Turn aborted: {0}")]
    TurnAborted(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, EngineError>;
