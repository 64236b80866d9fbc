//! Building the external reply provider from configuration.

use flirtquest_core::config::LlmConfig;
use flirtquest_core::error::{EngineError, Result};
use flirtquest_llm::{LlmClient, LlmProvider};
use tracing::info;

/// Construct the configured provider client.
///
/// The OpenAI key is read from the environment variable named by
/// `api_key_env`; without it the client has no backend and every turn uses
/// the simulated reply.
///
/// # Errors
/// Returns `EngineError::Config` for an unknown provider name.
pub fn client_from_config(config: &LlmConfig) -> Result<LlmClient> {
    match config.provider.as_str() {
        "none" | "" => Ok(LlmClient::none()),
        "ollama" => Ok(LlmClient::new(
            LlmProvider::Ollama {
                base_url: config.base_url.clone(),
            },
            config.model.clone(),
            config.max_retries,
        )),
        "openai" => match std::env::var(&config.api_key_env) {
            Ok(api_key) if !api_key.trim().is_empty() => Ok(LlmClient::new(
                LlmProvider::OpenAiCompatible {
                    base_url: config.base_url.clone(),
                    api_key: api_key.trim().to_string(),
                },
                config.model.clone(),
                config.max_retries,
            )),
            _ => {
                info!(env = %config.api_key_env, "No API key set; replies will be simulated");
                Ok(LlmClient::none())
            }
        },
        other => Err(EngineError::Config(format!("unknown LLM provider '{other}'"))),
    }
}
