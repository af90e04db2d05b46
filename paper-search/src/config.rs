//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which paper source is queried, how many
//! candidates are fetched and kept, timeouts, caching, and request
//! behaviour. It deserialises from the `[search]` table of the
//! application config file.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::SearchSource;

/// Default number of ranked papers returned.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Configuration for a paper search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Which paper source to query.
    pub source: SearchSource,
    /// Maximum number of papers to return after ranking.
    pub max_results: usize,
    /// How many candidates to request from the source before ranking.
    /// Must be at least `max_results`.
    pub candidate_pool: usize,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// How long to cache ranked results from the built-in sources, in
    /// seconds. Set to 0 to disable caching.
    pub cache_ttl_seconds: u64,
    /// Restrict arXiv queries to submissions from this year onward. When the
    /// restricted query finds nothing, the unrestricted query is tried.
    pub submitted_since_year: Option<i32>,
    /// Custom User-Agent string. If `None`, rotates through a built-in list.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source: SearchSource::Arxiv,
            max_results: DEFAULT_MAX_RESULTS,
            candidate_pool: 10,
            timeout_seconds: 15,
            cache_ttl_seconds: 600,
            submitted_since_year: Some(chrono::Utc::now().year() - 1),
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `candidate_pool` must be >= `max_results`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.candidate_pool < self.max_results {
            return Err(SearchError::Config(
                "candidate_pool must be >= max_results".into(),
            ));
        }
        Ok(())
    }
}
