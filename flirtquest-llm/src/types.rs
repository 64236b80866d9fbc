//! Provider-neutral request types.

use serde::{Deserialize, Serialize};

/// Speaker of one history entry, independent of any vendor's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// Instructions and scenario notes.
    System,
    /// The crush character.
    Character,
    /// The human player.
    Player,
}

impl ChatRole {
    /// Role name understood by OpenAI-style chat APIs (and Ollama).
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::Character => "assistant",
            ChatRole::Player => "user",
        }
    }
}

/// One entry of the history handed to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking.
    pub role: ChatRole,
    /// What they said.
    pub content: String,
}

impl ChatMessage {
    /// Create a history entry.
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A request for the character's next line.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyRequest {
    /// Ordered history, synthesized system entry first, newest player
    /// message last.
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl ReplyRequest {
    /// Create a request with the game's default limits.
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            max_tokens: 160,
            temperature: 0.9,
            timeout_ms: 5000,
        }
    }

    /// Set the token limit.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
