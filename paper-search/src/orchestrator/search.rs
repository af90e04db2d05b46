//! Core search pipeline: build query, fetch candidates, rank, truncate.
//!
//! The orchestrator is generic over [`PaperSource`] so the same pipeline
//! runs against arXiv, Google Scholar, or a canned source in tests.

use crate::cache::{self, CacheKey};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::query::{build_query, key_terms, validate_topic};
use crate::source::PaperSource;
use crate::types::Paper;

use super::scoring::{rank_scored, ScoredPaper};

/// Run the search pipeline against `source`, keeping relevance scores.
///
/// # Pipeline
///
/// 1. Validate config and topic
/// 2. Serve from the cache when `source` is cacheable and caching is on
/// 3. Build the provider query from the topic's key terms
/// 4. Fetch `config.candidate_pool` candidates from `source`
/// 5. Score, stable-sort and truncate to `config.max_results`
/// 6. Store the ranked list in the cache under the same conditions as 2
///
/// An empty candidate list is not an error; it yields an empty result.
///
/// # Errors
///
/// Returns [`SearchError::Config`] or [`SearchError::InvalidTopic`] on bad
/// input, and whatever the source returns if fetching fails.
pub async fn orchestrate_scored<S: PaperSource>(
    source: &S,
    topic: &str,
    config: &SearchConfig,
) -> Result<Vec<ScoredPaper>, SearchError> {
    config.validate()?;
    let topic = validate_topic(topic)?;

    let key = (source.cacheable() && config.cache_ttl_seconds > 0)
        .then(|| CacheKey::new(topic, source.kind(), config));
    if let Some(key) = &key {
        if let Some(hit) = cache::get(key, config.cache_ttl_seconds).await {
            tracing::debug!(source = %source.kind(), count = hit.len(), "search cache hit");
            return Ok(hit);
        }
    }

    let terms = key_terms(topic);
    let query = build_query(topic);
    tracing::trace!(topic, query = %query, source = %source.kind(), "searching");

    let candidates = source
        .search(&query, config.candidate_pool, config)
        .await
        .inspect_err(|err| {
            tracing::warn!(source = %source.kind(), error = %err, "paper source failed");
        })?;

    tracing::debug!(
        source = %source.kind(),
        count = candidates.len(),
        "candidates fetched"
    );

    let ranked = rank_scored(candidates, &terms, topic, config.max_results);
    if let Some(key) = key {
        cache::insert(key, ranked.clone(), config.cache_ttl_seconds).await;
    }
    Ok(ranked)
}

/// Run the search pipeline against `source`, returning ranked papers.
///
/// # Errors
///
/// Same as [`orchestrate_scored`].
pub async fn orchestrate_search<S: PaperSource>(
    source: &S,
    topic: &str,
    config: &SearchConfig,
) -> Result<Vec<Paper>, SearchError> {
    let scored = orchestrate_scored(source, topic, config).await?;
    Ok(scored.into_iter().map(|entry| entry.paper).collect())
}
