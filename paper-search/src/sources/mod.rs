//! Paper source implementations.
//!
//! Each module provides a struct implementing [`crate::source::PaperSource`]
//! for one provider.

pub mod arxiv;
pub mod scholar;

pub use arxiv::ArxivSource;
pub use scholar::ScholarSource;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::source::PaperSource;
use crate::types::{Paper, SearchSource};

/// Query the built-in source selected by `source`, dispatching to the
/// concrete implementation.
pub async fn query_source(
    source: SearchSource,
    query: &str,
    max_results: usize,
    config: &SearchConfig,
) -> Result<Vec<Paper>, SearchError> {
    match source {
        SearchSource::Arxiv => ArxivSource::new().search(query, max_results, config).await,
        SearchSource::GoogleScholar => {
            ScholarSource::new()
                .search(query, max_results, config)
                .await
        }
    }
}

/// The built-in source selected by a [`SearchSource`], usable wherever a
/// single [`PaperSource`] value is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSource(pub SearchSource);

impl PaperSource for BuiltinSource {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &SearchConfig,
    ) -> Result<Vec<Paper>, SearchError> {
        query_source(self.0, query, max_results, config).await
    }

    fn kind(&self) -> SearchSource {
        self.0
    }

    fn cacheable(&self) -> bool {
        true
    }
}
