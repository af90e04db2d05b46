//! OpenAI-compatible chat completions client.
//!
//! Works with any server implementing `POST /v1/chat/completions`:
//! - OpenAI (`https://api.openai.com`)
//! - Ollama (`http://localhost:11434`)
//! - vLLM, llama.cpp server, etc.
//!
//! Requests are non-streaming; the whole completion is returned at once.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TextGenerator;
use super::error::LlmError;
use crate::config::LlmConfig;

/// Connection and sampling settings for [`OpenAiClient`].
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// API key for bearer authentication. `None` for local servers.
    pub api_key: Option<String>,
    /// Base URL (defaults to `https://api.openai.com`).
    pub base_url: String,
    /// The model to use.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: usize,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiSettings {
    /// Create settings with the given API key and model.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let defaults = LlmConfig::default();
        Self {
            api_key,
            base_url: defaults.api_url,
            model: model.into(),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            timeout: Duration::from_secs(defaults.timeout_seconds),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build settings from the `[llm]` config section, resolving the API key.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigError`] when the section is invalid or the
    /// key reference cannot be resolved.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        config
            .validate()
            .map_err(|e| LlmError::ConfigError(e.to_string()))?;
        let api_key = config
            .api_key
            .resolve()
            .map_err(|e| LlmError::ConfigError(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Full chat completions endpoint, accepting base URLs with or without `/v1`.
    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);
        format!("{base}/v1/chat/completions")
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    max_tokens: usize,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Text generator backed by an OpenAI-compatible chat completions API.
pub struct OpenAiClient {
    settings: OpenAiSettings,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.settings.model)
            .field("base_url", &self.settings.base_url)
            .finish()
    }
}

impl OpenAiClient {
    /// Create a client with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigError`] if the HTTP client cannot be built.
    pub fn new(settings: OpenAiSettings) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { settings, client })
    }

    /// Create a client from the `[llm]` config section.
    ///
    /// # Errors
    ///
    /// See [`OpenAiSettings::from_config`].
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let settings = OpenAiSettings::from_config(config)?;
        tracing::info!(
            url = %settings.base_url,
            model = %settings.model,
            api_key = %config.api_key.describe(),
            "OpenAI-compatible client configured"
        );
        Self::new(settings)
    }

    /// Map an HTTP error status to the appropriate LlmError.
    fn map_http_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        let message = extract_error_message(body);
        match status.as_u16() {
            401 | 403 => LlmError::AuthError(format!("OpenAI authentication failed: {message}")),
            429 => LlmError::RateLimited(format!("OpenAI rate limited: {message}")),
            _ => LlmError::ProviderError(format!("OpenAI HTTP {}: {message}", status.as_u16())),
        }
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.settings.completions_url();
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            stream: false,
        };

        tracing::debug!(model = %self.settings.model, prompt_chars = prompt.len(), "chat completion request");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(api_key) = &self.settings.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::RequestError(format!("OpenAI request timed out: {e}"))
            } else {
                LlmError::RequestError(format!("OpenAI request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::map_http_error(status, &body_text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ProviderError(format!("invalid OpenAI response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_owned())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::EmptyResponse(format!(
                "model {} returned no content",
                self.settings.model
            )));
        }

        tracing::debug!(chars = content.len(), "chat completion received");
        Ok(content)
    }
}
