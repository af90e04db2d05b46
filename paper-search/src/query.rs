//! Query building: free-text topic → key terms → provider query string.
//!
//! Low-information words are dropped and each remaining term is wrapped
//! in exact-phrase quotes, joined with `AND`:
//!
//! ```text
//! "graph neural networks for traffic"  →  "graph" AND "neural" AND "networks" AND "traffic"
//! ```
//!
//! When nothing survives filtering (the topic was all stop-words), the
//! trimmed topic itself is used as the query.

use crate::error::SearchError;

/// Words dropped from topics before building a query.
///
/// Membership is fixed: it changes both the query and the ranking score,
/// so tests depend on it exactly.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "by", "for", "from", "in", "into", "is", "of", "on",
    "or", "the", "to", "via", "with",
];

/// Tokens shorter than this many characters are dropped.
pub const MIN_TERM_CHARS: usize = 3;

/// Conjunctive operator placed between quoted terms.
const AND_OPERATOR: &str = " AND ";

/// Check that `topic` has content and return it trimmed.
///
/// # Errors
///
/// Returns [`SearchError::InvalidTopic`] for empty or whitespace-only topics.
pub fn validate_topic(topic: &str) -> Result<&str, SearchError> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(SearchError::InvalidTopic(
            "topic must not be empty".into(),
        ));
    }
    Ok(trimmed)
}

/// Whether `token` (already lower-cased) is a stop-word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Extract the key term set from a topic.
///
/// Splits on whitespace, lower-cases, drops stop-words and tokens shorter
/// than [`MIN_TERM_CHARS`], and removes duplicates keeping first-seen order.
/// Tokens are otherwise kept verbatim, so `c++` and `c#` survive.
pub fn key_terms(topic: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for raw in topic.split_whitespace() {
        let token = raw.to_lowercase();
        if token.chars().count() < MIN_TERM_CHARS || is_stop_word(&token) {
            continue;
        }
        if !terms.contains(&token) {
            terms.push(token);
        }
    }
    terms
}

/// Build a provider query string from a topic.
///
/// Deterministic and side-effect free. Never returns an empty string for
/// a topic that has non-whitespace content.
pub fn build_query(topic: &str) -> String {
    let terms = key_terms(topic);
    if terms.is_empty() {
        return topic.trim().to_string();
    }
    terms
        .iter()
        .map(|term| format!("\"{term}\""))
        .collect::<Vec<_>>()
        .join(AND_OPERATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_terms_basic() {
        assert_eq!(
            key_terms("graph neural networks"),
            vec!["graph", "neural", "networks"]
        );
    }

    #[test]
    fn key_terms_lowercases() {
        assert_eq!(key_terms("Graph NEURAL Networks"), vec!["graph", "neural", "networks"]);
    }

    #[test]
    fn key_terms_drops_stop_words() {
        assert_eq!(
            key_terms("the role of attention in transformers"),
            vec!["role", "attention", "transformers"]
        );
    }

    #[test]
    fn key_terms_drops_short_tokens() {
        // "ai" and "ml" are below the length threshold.
        assert_eq!(key_terms("ai ml robotics"), vec!["robotics"]);
    }

    #[test]
    fn key_terms_deduplicates_preserving_order() {
        assert_eq!(
            key_terms("learning deep learning Deep"),
            vec!["learning", "deep"]
        );
    }

    #[test]
    fn key_terms_keeps_punctuation_in_tokens() {
        assert_eq!(key_terms("C++ compilers"), vec!["c++", "compilers"]);
        assert_eq!(key_terms("(ai) agents"), vec!["(ai)", "agents"]);
        assert_eq!(key_terms("models, survey"), vec!["models,", "survey"]);
    }

    #[test]
    fn key_terms_length_counts_punctuation() {
        // "c#" is two characters and dropped; "f#." is three and kept.
        assert_eq!(key_terms("c# f#. tooling"), vec!["f#.", "tooling"]);
    }

    #[test]
    fn key_terms_keeps_inner_hyphens() {
        assert_eq!(key_terms("self-supervised vision"), vec!["self-supervised", "vision"]);
    }

    #[test]
    fn build_query_quotes_and_joins_terms() {
        assert_eq!(
            build_query("graph neural networks"),
            "\"graph\" AND \"neural\" AND \"networks\""
        );
    }

    #[test]
    fn build_query_keeps_symbolic_terms() {
        assert_eq!(build_query("C++ compilers"), "\"c++\" AND \"compilers\"");
    }

    #[test]
    fn build_query_single_term() {
        assert_eq!(build_query("the transformers"), "\"transformers\"");
    }

    #[test]
    fn build_query_falls_back_to_trimmed_topic() {
        assert_eq!(build_query("  of the in  "), "of the in");
        assert_eq!(build_query("AI"), "AI");
    }

    #[test]
    fn build_query_is_deterministic() {
        let a = build_query("quantum error correction codes");
        let b = build_query("quantum error correction codes");
        assert_eq!(a, b);
    }

    #[test]
    fn build_query_never_empty_for_non_empty_topic() {
        for topic in ["a", "x y z", "of", "the an a", "graph", " ok ", "é"] {
            assert!(
                !build_query(topic).is_empty(),
                "empty query for topic {topic:?}"
            );
        }
    }

    #[test]
    fn validate_topic_rejects_blank() {
        assert!(validate_topic("").is_err());
        assert!(validate_topic("   \t\n").is_err());
    }

    #[test]
    fn validate_topic_trims() {
        assert_eq!(validate_topic("  llm agents ").ok(), Some("llm agents"));
    }

    #[test]
    fn stop_word_lookup() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("with"));
        assert!(!is_stop_word("graph"));
    }
}
