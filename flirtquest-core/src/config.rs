//! Configuration for the FlirtQuest engine.
//!
//! Maps directly to `flirtquest.toml`. Every field has a default, so an
//! empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::types::{PersonalityKey, SceneKey};

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlirtConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Conversation engine tuning.
    #[serde(default)]
    pub engine: EngineConfig,
    /// External reply provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl FlirtConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::EngineError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format: "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// Conversation engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Chemistry at session start and after a reset.
    #[serde(default = "default_50")]
    pub initial_chemistry: u8,
    /// Player turns between scenario events (0 disables events).
    #[serde(default = "default_4")]
    pub event_interval: u32,
    /// How many prior messages are sent to the external provider.
    #[serde(default = "default_8")]
    pub history_window: usize,
    /// Scene selected when a session starts.
    #[serde(default = "default_scene")]
    pub default_scene: SceneKey,
    /// Personality selected when a session starts.
    #[serde(default = "default_personality")]
    pub default_personality: PersonalityKey,
    /// Fixed RNG seed for reproducible sessions; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Simulated "typing" pause before a fallback reply.
    #[serde(default)]
    pub thinking_delay: ThinkingDelay,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_chemistry: 50,
            event_interval: 4,
            history_window: 8,
            default_scene: SceneKey::Cafeteria,
            default_personality: PersonalityKey::Nerd,
            seed: None,
            thinking_delay: ThinkingDelay::default(),
        }
    }
}

/// Bounded random pause: uniformly in `[base_ms, base_ms + jitter_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingDelay {
    /// Minimum pause in milliseconds.
    #[serde(default = "default_500")]
    pub base_ms: u64,
    /// Extra random pause on top of the base, in milliseconds.
    #[serde(default = "default_700")]
    pub jitter_ms: u64,
}

impl ThinkingDelay {
    /// No pause at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            base_ms: 0,
            jitter_ms: 0,
        }
    }

    /// Upper bound (exclusive when jitter is non-zero) on the pause.
    #[must_use]
    pub fn max_ms(&self) -> u64 {
        self.base_ms.saturating_add(self.jitter_ms)
    }
}

impl Default for ThinkingDelay {
    fn default() -> Self {
        Self {
            base_ms: 500,
            jitter_ms: 700,
        }
    }
}

/// External reply provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider: "openai", "ollama", "none".
    #[serde(default = "default_none")]
    pub provider: String,
    /// Base URL for the provider API.
    #[serde(default = "default_openai_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Maximum tokens to generate per reply.
    #[serde(default = "default_160")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_0_9")]
    pub temperature: f32,
    /// Hard timeout for one provider call in milliseconds.
    #[serde(default = "default_5000")]
    pub request_timeout_ms: u64,
    /// Extra attempts before giving up and falling back.
    #[serde(default)]
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "none".to_string(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_tokens: 160,
            temperature: 0.9,
            request_timeout_ms: 5000,
            max_retries: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }
fn default_none() -> String { "none".to_string() }
fn default_openai_url() -> String { "https://api.openai.com".to_string() }
fn default_model() -> String { "gpt-4.1-mini".to_string() }
fn default_api_key_env() -> String { "OPENAI_API_KEY".to_string() }
fn default_scene() -> SceneKey { SceneKey::Cafeteria }
fn default_personality() -> PersonalityKey { PersonalityKey::Nerd }
fn default_0_9() -> f32 { 0.9 }
fn default_4() -> u32 { 4 }
fn default_8() -> usize { 8 }
fn default_50() -> u8 { 50 }
fn default_160() -> u32 { 160 }
fn default_500() -> u64 { 500 }
fn default_700() -> u64 { 700 }
fn default_5000() -> u64 { 5000 }

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = FlirtConfig::from_toml("").unwrap();
        assert_eq!(config.engine.initial_chemistry, 50);
        assert_eq!(config.engine.event_interval, 4);
        assert_eq!(config.engine.history_window, 8);
        assert_eq!(config.engine.thinking_delay, ThinkingDelay::default());
        assert_eq!(config.llm.provider, "none");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn overrides_parse() {
        let config = FlirtConfig::from_toml(
            r#"
            [engine]
            default_scene = "Biblioteca"
            default_personality = "Sarcástica"
            seed = 99
            thinking_delay = { base_ms = 0, jitter_ms = 0 }

            [llm]
            provider = "ollama"
            base_url = "http://localhost:11434"
            model = "llama3.2"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.default_scene, SceneKey::Biblioteca);
        assert_eq!(config.engine.default_personality, PersonalityKey::Sarcastica);
        assert_eq!(config.engine.seed, Some(99));
        assert_eq!(config.engine.thinking_delay, ThinkingDelay::none());
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.max_tokens, 160);
    }

    #[test]
    fn unknown_scene_is_a_config_error() {
        let err = FlirtConfig::from_toml("[engine]\ndefault_scene = \"Playa\"").unwrap_err();
        assert!(matches!(err, crate::EngineError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nlog_level = \"debug\"").unwrap();
        let config = FlirtConfig::from_file(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
    }
}
