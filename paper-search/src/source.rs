//! Trait definition for pluggable paper sources.
//!
//! Each source (arXiv, Google Scholar) implements [`PaperSource`] to
//! provide a uniform interface for fetching candidate papers. Tests and
//! callers that must not touch the network inject their own
//! implementations.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{Paper, SearchSource};

/// A pluggable paper source.
///
/// Implementors fetch a finite, possibly empty, list of candidate papers
/// for a query. Each source handles its own:
///
/// - URL construction with query encoding
/// - HTTP request with appropriate headers
/// - Response parsing (Atom XML, HTML)
/// - Error handling for rate limiting, bot detection, or parse failures
///
/// Results should be returned in the source's natural order (newest
/// first for arXiv); the ranker relies on that order to break ties.
pub trait PaperSource: Send + Sync {
    /// Fetch up to `max_results` candidate papers for `query`.
    ///
    /// # Arguments
    ///
    /// * `query`: a query string as produced by [`crate::query::build_query`].
    /// * `max_results`: how many candidates to request.
    /// * `config`: search configuration controlling timeouts, date filters, etc.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails, the response cannot
    /// be parsed, or the source is rate-limiting/blocking requests.
    fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<Paper>, SearchError>> + Send;

    /// Returns which [`SearchSource`] variant this implementation represents.
    fn kind(&self) -> SearchSource;

    /// Whether ranked results from this source may be served from the
    /// process-wide cache.
    ///
    /// Only sources whose results are fully determined by [`kind`](Self::kind)
    /// and the [`SearchConfig`] should opt in. A source pointed at another
    /// endpoint would otherwise share entries with the real provider.
    fn cacheable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mock source for testing trait bounds and async execution.
    struct MockSource {
        papers: Vec<Paper>,
        fail: bool,
    }

    impl PaperSource for MockSource {
        async fn search(
            &self,
            _query: &str,
            max_results: usize,
            _config: &SearchConfig,
        ) -> Result<Vec<Paper>, SearchError> {
            if self.fail {
                return Err(SearchError::RateLimited("mock source throttled".into()));
            }
            Ok(self.papers.iter().take(max_results).cloned().collect())
        }

        fn kind(&self) -> SearchSource {
            SearchSource::Arxiv
        }
    }

    fn paper(id: &str) -> Paper {
        Paper {
            id: id.into(),
            title: format!("Title {id}"),
            summary: String::new(),
            authors: vec![],
            published: None,
            url: String::new(),
            source: SearchSource::Arxiv,
        }
    }

    #[test]
    fn mock_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockSource>();
    }

    #[tokio::test]
    async fn mock_source_honours_max_results() {
        let source = MockSource {
            papers: vec![paper("1"), paper("2"), paper("3")],
            fail: false,
        };
        let papers = source
            .search("q", 2, &SearchConfig::default())
            .await
            .expect("should succeed");
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].id, "1");
    }

    #[tokio::test]
    async fn mock_source_propagates_errors() {
        let source = MockSource {
            papers: vec![],
            fail: true,
        };
        let result = source.search("q", 5, &SearchConfig::default()).await;
        assert!(matches!(result, Err(SearchError::RateLimited(_))));
    }

    #[test]
    fn sources_are_not_cached_by_default() {
        let source = MockSource {
            papers: vec![],
            fail: false,
        };
        assert!(!source.cacheable());
    }

    #[test]
    fn kind_returns_variant() {
        let source = MockSource {
            papers: vec![],
            fail: false,
        };
        assert_eq!(source.kind(), SearchSource::Arxiv);
    }
}
