//! Search orchestrator: query building, fetching, scoring, ranking.
//!
//! This module turns a topic into a provider query, fetches candidates
//! from a paper source, scores them against the topic's key terms, and
//! returns a stable-sorted, truncated result set.

pub mod scoring;
pub mod search;
