//! In-memory cache for ranked search results.
//!
//! Caches the final ranked, truncated paper lists (with their scores) keyed
//! by the normalised topic, the source, and every config field that changes
//! what the source returns. Uses [`moka`] for async-friendly caching with
//! configurable TTL and automatic eviction.

use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;

use crate::config::SearchConfig;
use crate::orchestrator::scoring::ScoredPaper;
use crate::types::SearchSource;

/// Maximum number of cached result lists.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Global process-wide result cache.
///
/// Lazily initialised on first access. TTL is set when first created
/// and cannot be changed after initialisation.
static CACHE: OnceLock<Cache<CacheKey, Vec<ScoredPaper>>> = OnceLock::new();

/// Composite cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased topic with whitespace runs collapsed.
    topic: String,
    source: SearchSource,
    max_results: usize,
    candidate_pool: usize,
    submitted_since_year: Option<i32>,
}

impl CacheKey {
    /// Build a deterministic cache key.
    ///
    /// The topic is lowercased and its whitespace collapsed, so
    /// `"Graph  Neural"` and `"graph neural"` share an entry. Timeouts and
    /// the User-Agent do not change results and are left out.
    pub fn new(topic: &str, source: SearchSource, config: &SearchConfig) -> Self {
        let topic = topic
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Self {
            topic,
            source,
            max_results: config.max_results,
            candidate_pool: config.candidate_pool,
            submitted_since_year: config.submitted_since_year,
        }
    }
}

/// Get or initialise the global cache with the given TTL.
///
/// The TTL is only used on the **first** call; subsequent calls reuse
/// the existing cache regardless of the TTL argument.
fn get_or_init_cache(ttl_seconds: u64) -> &'static Cache<CacheKey, Vec<ScoredPaper>> {
    CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build()
    })
}

/// Look up cached results for the given key.
///
/// Returns `Some(papers)` on cache hit, `None` on miss.
pub async fn get(key: &CacheKey, ttl_seconds: u64) -> Option<Vec<ScoredPaper>> {
    let cache = get_or_init_cache(ttl_seconds);
    cache.get(key).await
}

/// Insert ranked results into the cache.
pub async fn insert(key: CacheKey, papers: Vec<ScoredPaper>, ttl_seconds: u64) {
    let cache = get_or_init_cache(ttl_seconds);
    cache.insert(key, papers).await;
}
