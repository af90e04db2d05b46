//! Configuration types for the paperscribe pipeline.

use crate::error::{Result, ScribeError};
use crate::secret::ApiKeyRef;
use paper_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Topic used when none is given on the command line or at the prompt.
pub const DEFAULT_TOPIC: &str = "machine learning";

/// Top-level configuration for the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScribeConfig {
    /// Topic used when the user does not supply one.
    pub default_topic: String,
    /// Paper search settings.
    pub search: SearchConfig,
    /// Language model settings.
    pub llm: LlmConfig,
    /// Blog output settings.
    pub output: OutputConfig,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            default_topic: DEFAULT_TOPIC.to_owned(),
            search: SearchConfig::default(),
            llm: LlmConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// OpenAI-compatible chat completions settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the API server (without `/v1/...`).
    pub api_url: String,
    /// Model name to request.
    pub model: String,
    /// Sampling temperature (0.0 = greedy, higher = more random).
    pub temperature: f64,
    /// Maximum tokens to generate per response.
    pub max_tokens: usize,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Where to find the API key.
    pub api_key: ApiKeyRef,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_owned(),
            model: "gpt-3.5-turbo".to_owned(),
            temperature: 0.7,
            max_tokens: 1200,
            timeout_seconds: 60,
            api_key: ApiKeyRef::default(),
        }
    }
}

impl LlmConfig {
    /// Validate the LLM settings.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::Config`] for an empty URL or model, a
    /// temperature outside `0.0..=2.0`, or zero tokens / timeout.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ScribeError::Config("llm.api_url is empty".to_owned()));
        }
        if self.model.trim().is_empty() {
            return Err(ScribeError::Config("llm.model is empty".to_owned()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ScribeError::Config(format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(ScribeError::Config(
                "llm.max_tokens must be greater than 0".to_owned(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ScribeError::Config(
                "llm.timeout_seconds must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Blog output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the blog file is written to.
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl ScribeConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScribeError::Config(e.to_string()))
    }

    /// Load the config at `path` if given, else the default config file if it
    /// exists, else built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    tracing::debug!(path = %default_path.display(), "loading default config");
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ScribeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/paperscribe/config.toml`.
    pub fn default_config_path() -> PathBuf {
        crate::scribe_dirs::config_file()
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.default_topic.trim().is_empty() {
            return Err(ScribeError::Config("default_topic is empty".to_owned()));
        }
        self.search
            .validate()
            .map_err(|e| ScribeError::Config(e.to_string()))?;
        self.llm.validate()
    }
}
