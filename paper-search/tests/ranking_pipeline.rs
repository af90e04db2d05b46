//! Integration tests for the query → rank pipeline.
//!
//! These tests exercise query building and relevance ranking through the
//! public API using synthetic papers (no network calls).

use paper_search::{
    build_query, key_terms, rank, rank_scored, search_with, Paper, PaperSource, SearchConfig,
    SearchError, SearchSource,
};

fn make_paper(id: &str, title: &str, summary: &str) -> Paper {
    Paper {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        authors: vec!["Test Author".to_string()],
        published: None,
        url: format!("https://arxiv.org/pdf/{id}"),
        source: SearchSource::Arxiv,
    }
}

struct Canned(Vec<Paper>);

impl PaperSource for Canned {
    async fn search(
        &self,
        _query: &str,
        max_results: usize,
        _config: &SearchConfig,
    ) -> Result<Vec<Paper>, SearchError> {
        Ok(self.0.iter().take(max_results).cloned().collect())
    }

    fn kind(&self) -> SearchSource {
        SearchSource::Arxiv
    }
}

#[test]
fn graph_neural_networks_scenario() {
    let topic = "graph neural networks";
    assert_eq!(key_terms(topic), vec!["graph", "neural", "networks"]);

    let a = make_paper(
        "A",
        "Graph Neural Networks for Traffic Prediction",
        "We study traffic...",
    );
    let b = make_paper(
        "B",
        "A Survey of Deep Learning",
        "...graph neural networks are mentioned briefly...",
    );

    let scored = rank_scored(vec![b, a], &key_terms(topic), topic, 5);
    assert_eq!(scored[0].paper.id, "A");
    assert!(scored[0].score >= 9.0);
    assert_eq!(scored[1].paper.id, "B");
    assert!(scored[1].score >= 1.0);
}

#[test]
fn empty_candidates_scenario() {
    assert!(rank(vec![], "graph neural networks", 5).is_empty());
}

#[test]
fn equal_scores_truncate_to_first_inputs() {
    let candidates: Vec<Paper> = (0..5)
        .map(|i| make_paper(&format!("p{i}"), "Same title", "Same summary"))
        .collect();
    let ranked = rank(candidates, "same title", 2);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].id, "p0");
    assert_eq!(ranked[1].id, "p1");
}

#[test]
fn output_bounded_and_drawn_from_input() {
    let topics = ["diffusion models", "the", "protein structure prediction"];
    let candidates: Vec<Paper> = vec![
        make_paper("1", "Diffusion Models Beat GANs", "image synthesis"),
        make_paper("2", "Protein Structure Prediction at Scale", "folding"),
        make_paper("3", "Score-based generative modelling", "diffusion"),
        make_paper("4", "Nothing relevant", ""),
    ];

    for topic in topics {
        for max in 0..6 {
            let ranked = rank(candidates.clone(), topic, max);
            assert!(ranked.len() <= max);
            assert!(ranked.len() <= candidates.len());
            for paper in &ranked {
                assert!(candidates.contains(paper), "fabricated paper {}", paper.id);
            }
        }
    }
}

#[test]
fn all_zero_scores_keep_input_order() {
    let candidates: Vec<Paper> = ["d", "c", "b", "a"]
        .iter()
        .map(|id| make_paper(id, "Unrelated", "Unrelated"))
        .collect();
    let ranked = rank(candidates.clone(), "quantum cryptography", 10);
    assert_eq!(ranked, candidates);
}

#[test]
fn query_never_empty_for_non_empty_topic() {
    for topic in ["graph neural networks", "of the", "AI", "x", "in on at"] {
        assert!(!build_query(topic).is_empty(), "topic {topic:?}");
    }
}

#[tokio::test]
async fn search_with_injected_source_ranks_results() {
    let source = Canned(vec![
        make_paper("old", "Unrelated work", ""),
        make_paper("hit", "Sparse Attention for Long Documents", "sparse attention"),
    ]);
    let config = SearchConfig {
        max_results: 1,
        candidate_pool: 5,
        cache_ttl_seconds: 0,
        ..Default::default()
    };
    let papers = search_with(&source, "sparse attention", &config)
        .await
        .expect("should succeed");
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].id, "hit");
}
