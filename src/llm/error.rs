//! Error types for the LLM client.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) that is
//! included in the Display output and accessible via [`LlmError::code()`].

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// Invalid or missing configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Authentication failed (invalid/missing API key).
    pub const AUTH_FAILED: &str = "AUTH_FAILED";

    /// The provider rejected the request with a rate limit.
    pub const RATE_LIMITED: &str = "RATE_LIMITED";

    /// Request to the LLM provider failed before a response arrived.
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";

    /// Provider-specific error not covered by other variants.
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";

    /// The provider answered but the completion had no text.
    pub const EMPTY_RESPONSE: &str = "EMPTY_RESPONSE";
}

/// Errors produced by a text generator.
///
/// The Display impl formats as `[CODE] message`.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Invalid or missing configuration.
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    ConfigError(String),

    /// Authentication failed (invalid/missing API key).
    #[error("[{}] {}", error_codes::AUTH_FAILED, .0)]
    AuthError(String),

    /// The provider rejected the request with a rate limit.
    #[error("[{}] {}", error_codes::RATE_LIMITED, .0)]
    RateLimited(String),

    /// Request to the LLM provider failed.
    #[error("[{}] {}", error_codes::REQUEST_FAILED, .0)]
    RequestError(String),

    /// Provider-specific error not covered by other variants.
    #[error("[{}] {}", error_codes::PROVIDER_ERROR, .0)]
    ProviderError(String),

    /// The completion contained no text.
    #[error("[{}] {}", error_codes::EMPTY_RESPONSE, .0)]
    EmptyResponse(String),
}

impl LlmError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => error_codes::CONFIG_INVALID,
            Self::AuthError(_) => error_codes::AUTH_FAILED,
            Self::RateLimited(_) => error_codes::RATE_LIMITED,
            Self::RequestError(_) => error_codes::REQUEST_FAILED,
            Self::ProviderError(_) => error_codes::PROVIDER_ERROR,
            Self::EmptyResponse(_) => error_codes::EMPTY_RESPONSE,
        }
    }

    /// Returns the inner message without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ConfigError(m)
            | Self::AuthError(m)
            | Self::RateLimited(m)
            | Self::RequestError(m)
            | Self::ProviderError(m)
            | Self::EmptyResponse(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(LlmError::ConfigError(String::new()).code(), "CONFIG_INVALID");
        assert_eq!(LlmError::AuthError(String::new()).code(), "AUTH_FAILED");
        assert_eq!(LlmError::RateLimited(String::new()).code(), "RATE_LIMITED");
        assert_eq!(LlmError::RequestError(String::new()).code(), "REQUEST_FAILED");
        assert_eq!(LlmError::ProviderError(String::new()).code(), "PROVIDER_ERROR");
        assert_eq!(LlmError::EmptyResponse(String::new()).code(), "EMPTY_RESPONSE");
    }

    #[test]
    fn display_includes_code_prefix() {
        let err = LlmError::RateLimited("slow down".into());
        assert_eq!(err.to_string(), "[RATE_LIMITED] slow down");
        assert_eq!(err.message(), "slow down");
    }
}
