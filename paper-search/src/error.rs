//! Error types for the paper-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. No API keys or sensitive data appear in
//! error messages.

/// Errors that can occur while searching for and ranking papers.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search topic is empty or whitespace-only.
    #[error("invalid topic: {0}")]
    InvalidTopic(String),

    /// An HTTP request to a paper source failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The paper source refused the request (HTTP 429/503, CAPTCHA wall).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Failed to parse the paper source response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The paper source answered with an explicit error payload.
    #[error("provider error: {0}")]
    Provider(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for paper-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
