//! Language model access for the analysis and blog steps.
//!
//! The pipeline only needs "prompt in, text out". [`TextGenerator`] is that
//! seam; [`OpenAiClient`] implements it against any OpenAI-compatible
//! server, and tests inject canned generators.

pub mod error;
pub mod openai;
pub mod prompts;

pub use error::LlmError;
pub use openai::{OpenAiClient, OpenAiSettings};

use async_trait::async_trait;

/// A single-shot text completion backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the backend name (e.g. `"openai"`).
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`.
    ///
    /// Implementations return [`LlmError::EmptyResponse`] rather than an
    /// empty string.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
