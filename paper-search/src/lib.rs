//! # paper-search
//!
//! Research paper search and relevance ranking for paperscribe.
//!
//! A free-text topic becomes a provider query of quoted key terms, a paper
//! source (arXiv by default, Google Scholar optionally) returns candidate
//! papers, and a keyword-match heuristic ranks them.
//!
//! ## Design
//!
//! - [`build_query`] and [`rank`] are pure functions over immutable inputs
//! - Paper sources sit behind the [`PaperSource`] trait so callers and tests
//!   can inject canned candidates without touching the network
//! - Ties in relevance keep the source's order (newest-first on arXiv)
//! - In-memory result cache with configurable TTL
//!
//! ## Security
//!
//! - No API keys or secrets
//! - Search topics are logged only at trace level

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod source;
pub mod sources;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::scoring::{rank, rank_scored, rank_with_terms, score_paper, ScoredPaper};
pub use query::{build_query, key_terms, validate_topic};
pub use source::PaperSource;
pub use sources::{ArxivSource, BuiltinSource, ScholarSource};
pub use types::{Paper, SearchSource};

/// Search for papers on `topic` using the source selected in `config`.
///
/// Builds the query, fetches `config.candidate_pool` candidates, ranks
/// them by relevance, and returns up to `config.max_results` papers.
/// Repeated topics are served from the in-memory cache while
/// `config.cache_ttl_seconds` is non-zero.
///
/// # Errors
///
/// Returns [`SearchError::InvalidTopic`] for a blank topic,
/// [`SearchError::Config`] for an invalid config, and the source's error
/// when fetching fails. An empty result is not an error.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> paper_search::Result<()> {
/// let config = paper_search::SearchConfig::default();
/// let papers = paper_search::search("graph neural networks", &config).await?;
/// for paper in &papers {
///     println!("{}: {}", paper.title, paper.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(topic: &str, config: &SearchConfig) -> Result<Vec<Paper>> {
    orchestrator::search::orchestrate_search(&BuiltinSource(config.source), topic, config).await
}

/// Search for papers on `topic` using an injected source.
///
/// The cache is consulted only when the source opts in through
/// [`PaperSource::cacheable`], as [`BuiltinSource`] does.
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_with<S: PaperSource>(
    source: &S,
    topic: &str,
    config: &SearchConfig,
) -> Result<Vec<Paper>> {
    orchestrator::search::orchestrate_search(source, topic, config).await
}

/// Search with the source selected in `config`, keeping relevance scores.
///
/// Shares cache entries with [`search`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_scored(topic: &str, config: &SearchConfig) -> Result<Vec<ScoredPaper>> {
    orchestrator::search::orchestrate_scored(&BuiltinSource(config.source), topic, config).await
}

/// Search for papers with sensible default configuration.
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(topic: &str) -> Result<Vec<Paper>> {
    search(topic, &SearchConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_zero_max_results() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.unwrap_err().to_string().contains("max_results"));
    }

    #[tokio::test]
    async fn search_validates_config_zero_timeout() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn search_rejects_blank_topic() {
        let result = search("  ", &SearchConfig::default()).await;
        assert!(matches!(result, Err(SearchError::InvalidTopic(_))));
    }
}
