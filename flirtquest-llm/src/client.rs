//! LLM client: reply provider backed by an OpenAI-compatible API or Ollama.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::provider::ReplyProvider;
use crate::types::ReplyRequest;

/// Provider backend for reply generation.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    /// Ollama running locally.
    Ollama { base_url: String },
    /// OpenAI-compatible API (also works with Together, Groq, etc.).
    OpenAiCompatible { base_url: String, api_key: String },
    /// No provider; every call fails, triggering the simulated fallback.
    None,
}

/// HTTP client that routes reply requests to the configured backend.
pub struct LlmClient {
    provider: LlmProvider,
    http: Client,
    model: String,
    max_retries: u32,
}

impl LlmClient {
    /// Create a new client.
    #[must_use]
    pub fn new(provider: LlmProvider, model: impl Into<String>, max_retries: u32) -> Self {
        Self {
            provider,
            http: Client::new(),
            model: model.into(),
            max_retries,
        }
    }

    /// Create a client with no backend (all calls fail → simulated fallback).
    #[must_use]
    pub fn none() -> Self {
        Self {
            provider: LlmProvider::None,
            http: Client::new(),
            model: String::new(),
            max_retries: 0,
        }
    }

    /// Model name sent with every request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the backend for the character's next line.
    ///
    /// Returns `Err` if the backend is unavailable, every attempt failed, or
    /// the reply was blank. The caller should fall back to the simulated reply.
    pub async fn generate(&self, request: &ReplyRequest) -> Result<String, LlmError> {
        match &self.provider {
            LlmProvider::None => Err(LlmError::Unavailable("No LLM provider configured".into())),
            LlmProvider::Ollama { base_url } => {
                let url = format!("{}/api/chat", base_url.trim_end_matches('/'));
                let body = json!({
                    "model": self.model,
                    "messages": wire_messages(request),
                    "stream": false,
                    "options": {
                        "temperature": request.temperature,
                        "num_predict": request.max_tokens,
                    }
                });
                self.post_with_retries(&url, None, &body, request.timeout_ms).await
            }
            LlmProvider::OpenAiCompatible { base_url, api_key } => {
                let url = format!("{}/v1/chat/completions", base_url.trim_end_matches('/'));
                let body = json!({
                    "model": self.model,
                    "messages": wire_messages(request),
                    "max_tokens": request.max_tokens,
                    "temperature": request.temperature,
                });
                self.post_with_retries(&url, Some(api_key.as_str()), &body, request.timeout_ms)
                    .await
            }
        }
    }

    async fn post_with_retries(
        &self,
        url: &str,
        api_key: Option<&str>,
        body: &Value,
        timeout_ms: u64,
    ) -> Result<String, LlmError> {
        let mut last_error = String::new();
        let mut timed_out = false;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!("Retrying LLM call (attempt {}/{})", attempt + 1, self.max_retries + 1);
            }

            let start = Instant::now();
            let mut builder = self
                .http
                .post(url)
                .json(body)
                .timeout(Duration::from_millis(timeout_ms));
            if let Some(key) = api_key {
                builder = builder.header("Authorization", format!("Bearer {key}"));
            }
            let result = builder.send().await;
            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) if resp.status().is_success() => {
                    let json: Value = resp
                        .json()
                        .await
                        .map_err(|e| LlmError::ParseError(e.to_string()))?;
                    debug!(latency_ms, model = %self.model, "LLM reply received");
                    return extract_reply_text(&json).ok_or(LlmError::EmptyResponse);
                }
                Ok(resp) => {
                    last_error = format!("HTTP {}", resp.status());
                    timed_out = false;
                    warn!("LLM provider returned error: {}", last_error);
                }
                Err(e) => {
                    last_error = e.to_string();
                    timed_out = e.is_timeout();
                    if timed_out {
                        warn!("LLM request timed out after {}ms", timeout_ms);
                    } else {
                        warn!("LLM request failed: {}", last_error);
                    }
                }
            }
        }

        if timed_out {
            return Err(LlmError::Timeout(timeout_ms));
        }
        Err(LlmError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }

    /// Check if the client has a backend configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, LlmProvider::None)
    }
}

impl ReplyProvider for LlmClient {
    async fn complete(&self, request: &ReplyRequest) -> Result<String, LlmError> {
        self.generate(request).await
    }

    fn is_available(&self) -> bool {
        LlmClient::is_available(self)
    }
}

fn wire_messages(request: &ReplyRequest) -> Vec<Value> {
    request
        .messages
        .iter()
        .map(|m| json!({ "role": m.role.wire_name(), "content": m.content }))
        .collect()
}

/// Pull the reply text out of a provider response.
///
/// Understands the Responses API (`output_text`), Chat Completions
/// (`choices[0].message.content`) and Ollama chat (`message.content`).
/// Returns `None` when none of them hold non-blank text.
#[must_use]
pub fn extract_reply_text(json: &Value) -> Option<String> {
    [
        &json["output_text"],
        &json["choices"][0]["message"]["content"],
        &json["message"]["content"],
    ]
    .into_iter()
    .filter_map(Value::as_str)
    .map(str::trim)
    .find(|text| !text.is_empty())
    .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, ChatRole};

    #[test]
    fn extracts_responses_api_text() {
        let json = json!({ "output_text": "  hola, ¿qué tal?  " });
        assert_eq!(extract_reply_text(&json).as_deref(), Some("hola, ¿qué tal?"));
    }

    #[test]
    fn extracts_chat_completions_text() {
        let json = json!({
            "choices": [{ "message": { "role": "assistant", "content": "¿café?" } }]
        });
        assert_eq!(extract_reply_text(&json).as_deref(), Some("¿café?"));
    }

    #[test]
    fn extracts_ollama_chat_text() {
        let json = json!({ "message": { "role": "assistant", "content": "jeje" }, "done": true });
        assert_eq!(extract_reply_text(&json).as_deref(), Some("jeje"));
    }

    #[test]
    fn blank_or_missing_text_is_none() {
        assert!(extract_reply_text(&json!({ "output_text": "   " })).is_none());
        assert!(extract_reply_text(&json!({ "choices": [] })).is_none());
        assert!(extract_reply_text(&json!({})).is_none());
    }

    #[test]
    fn wire_messages_use_vendor_roles() {
        let req = ReplyRequest::new(vec![
            ChatMessage::new(ChatRole::System, "sé amable"),
            ChatMessage::new(ChatRole::Character, "hola"),
            ChatMessage::new(ChatRole::Player, "¿qué tal?"),
        ]);
        let wire = wire_messages(&req);
        let roles: Vec<&str> = wire.iter().filter_map(|m| m["role"].as_str()).collect();
        assert_eq!(roles, vec!["system", "assistant", "user"]);
    }

    #[tokio::test]
    async fn none_provider_is_unavailable() {
        let client = LlmClient::none();
        assert!(!client.is_available());
        let err = client.generate(&ReplyRequest::new(vec![])).await.unwrap_err();
        assert!(matches!(err, LlmError::Unavailable(_)));
    }
}
