//! Error types for the paperscribe pipeline.

use crate::llm::LlmError;
use paper_search::SearchError;

/// Top-level error type for the search → analyse → blog pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ScribeError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Paper search error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Language model error.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The search returned no papers for the topic.
    #[error("no papers found for topic: {0}")]
    NoPapers(String),

    /// The blog step ran without an analysis to work from.
    #[error("no analysis available for paper: {0}")]
    NoAnalysis(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScribeError>;
