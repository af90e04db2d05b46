//! Keyword-match relevance scoring and ranking for candidate papers.
//!
//! Each candidate is scored independently against the topic and its key
//! terms. All contributions sum:
//!
//! | Match                                   | Points |
//! |-----------------------------------------|--------|
//! | whole topic phrase in title             | 10.0   |
//! | whole topic phrase in summary           | 5.0    |
//! | each key term in title                  | 3.0    |
//! | each key term in summary                | 1.0    |
//!
//! Matching is case-insensitive contiguous-substring matching. Candidates
//! are then stable-sorted by descending score, so ties keep the source's
//! order (newest-first for arXiv), and truncated.

use crate::query::key_terms;
use crate::types::Paper;

/// Bonus when the whole topic appears in the title.
pub const TITLE_PHRASE_WEIGHT: f64 = 10.0;
/// Bonus when the whole topic appears in the summary.
pub const SUMMARY_PHRASE_WEIGHT: f64 = 5.0;
/// Bonus per key term found in the title.
pub const TITLE_TERM_WEIGHT: f64 = 3.0;
/// Bonus per key term found in the summary.
pub const SUMMARY_TERM_WEIGHT: f64 = 1.0;

/// A candidate paper paired with its relevance score for one ranking pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPaper {
    /// The candidate, untouched.
    pub paper: Paper,
    /// Non-negative relevance score.
    pub score: f64,
}

/// Calculate the relevance score of `paper`.
///
/// `topic` is compared lower-cased and trimmed; `terms` are expected to
/// be lower-cased already (as produced by [`key_terms`]).
pub fn score_paper(paper: &Paper, topic: &str, terms: &[String]) -> f64 {
    let title = paper.title.to_lowercase();
    let summary = paper.summary.to_lowercase();
    let phrase = topic.trim().to_lowercase();

    let mut score = 0.0;

    if !phrase.is_empty() {
        if title.contains(&phrase) {
            score += TITLE_PHRASE_WEIGHT;
        }
        if summary.contains(&phrase) {
            score += SUMMARY_PHRASE_WEIGHT;
        }
    }

    for term in terms {
        if title.contains(term.as_str()) {
            score += TITLE_TERM_WEIGHT;
        }
        if summary.contains(term.as_str()) {
            score += SUMMARY_TERM_WEIGHT;
        }
    }

    score
}

/// Score, stable-sort (descending) and truncate, keeping the scores.
pub fn rank_scored(
    candidates: Vec<Paper>,
    terms: &[String],
    topic: &str,
    max_results: usize,
) -> Vec<ScoredPaper> {
    let mut scored: Vec<ScoredPaper> = candidates
        .into_iter()
        .map(|paper| {
            let score = score_paper(&paper, topic, terms);
            ScoredPaper { paper, score }
        })
        .collect();

    // `sort_by` is stable: equal scores keep their input order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_results);

    for (rank, entry) in scored.iter().enumerate() {
        tracing::debug!(rank, score = entry.score, id = %entry.paper.id, "ranked paper");
    }

    scored
}

/// Rank candidates against an explicit key term set.
pub fn rank_with_terms(
    candidates: Vec<Paper>,
    terms: &[String],
    topic: &str,
    max_results: usize,
) -> Vec<Paper> {
    rank_scored(candidates, terms, topic, max_results)
        .into_iter()
        .map(|entry| entry.paper)
        .collect()
}

/// Rank candidates by relevance to `topic`, returning at most `max_results`.
///
/// The key term set is derived from `topic`. An empty candidate list
/// yields an empty result.
pub fn rank(candidates: Vec<Paper>, topic: &str, max_results: usize) -> Vec<Paper> {
    let terms = key_terms(topic);
    rank_with_terms(candidates, &terms, topic, max_results)
}
