//! Paper graph: a root node for the search query with one child per paper.
//!
//! Used for the machine-readable search listing (`search --json`).

use paper_search::{Paper, ScoredPaper};
use serde::{Deserialize, Serialize};

/// Id of the root node.
pub const ROOT_ID: &str = "root";

/// What a graph node represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeData {
    /// The search the graph was built from.
    Root { query: String },
    /// One ranked paper.
    Paper {
        paper: Paper,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        score: Option<f64>,
    },
}

/// A node and its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(flatten)]
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GraphNode>,
}

impl GraphNode {
    /// Append `child` unless a child with the same id is already present.
    ///
    /// Returns `true` if the child was added.
    pub fn add_child(&mut self, child: GraphNode) -> bool {
        if self.children.iter().any(|c| c.id == child.id) {
            return false;
        }
        self.children.push(child);
        true
    }
}

/// Graph of the papers returned for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperGraph {
    root: GraphNode,
}

impl PaperGraph {
    /// Create a graph with only the root node.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            root: GraphNode {
                id: ROOT_ID.to_owned(),
                data: NodeData::Root {
                    query: query.into(),
                },
                children: Vec::new(),
            },
        }
    }

    /// Build a graph from ranked papers, keeping their scores.
    pub fn from_scored(query: impl Into<String>, scored: &[ScoredPaper]) -> Self {
        let mut graph = Self::new(query);
        for entry in scored {
            graph.add_paper(entry.paper.clone(), Some(entry.score));
        }
        graph
    }

    /// Add a paper node under the root. Duplicate paper ids are ignored.
    ///
    /// Returns `true` if the paper was added.
    pub fn add_paper(&mut self, paper: Paper, score: Option<f64>) -> bool {
        let node = GraphNode {
            id: paper.id.clone(),
            data: NodeData::Paper { paper, score },
            children: Vec::new(),
        };
        let added = self.root.add_child(node);
        if !added {
            tracing::debug!("duplicate paper node skipped");
        }
        added
    }

    /// The root node.
    pub fn root(&self) -> &GraphNode {
        &self.root
    }

    /// The query the graph was built for.
    pub fn query(&self) -> &str {
        match &self.root.data {
            NodeData::Root { query } => query,
            NodeData::Paper { .. } => "",
        }
    }

    /// Papers in insertion order.
    pub fn papers(&self) -> impl Iterator<Item = &Paper> {
        self.root.children.iter().filter_map(|node| match &node.data {
            NodeData::Paper { paper, .. } => Some(paper),
            NodeData::Root { .. } => None,
        })
    }

    /// Number of paper nodes.
    pub fn len(&self) -> usize {
        self.root.children.len()
    }

    /// True when no papers were added.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Pretty-printed JSON of the whole graph.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paper_search::SearchSource;

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
    fn new_graph_has_only_root() {
        let graph = PaperGraph::new("\"graph\"");
        assert_eq!(graph.root().id, "root");
        assert_eq!(graph.query(), "\"graph\"");
        assert!(graph.is_empty());
    }

    #[test]
    fn duplicate_ids_added_once() {
        let mut graph = PaperGraph::new("q");
        assert!(graph.add_paper(paper("a"), None));
        assert!(graph.add_paper(paper("b"), None));
        assert!(!graph.add_paper(paper("a"), Some(3.0)));
        let ids: Vec<&str> = graph.papers().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn from_scored_keeps_order_and_scores() {
        let scored = vec![
            ScoredPaper {
                paper: paper("x"),
                score: 13.0,
            },
            ScoredPaper {
                paper: paper("y"),
                score: 1.0,
            },
        ];
        let graph = PaperGraph::from_scored("q", &scored);
        assert_eq!(graph.len(), 2);
        match &graph.root().children[0].data {
            NodeData::Paper { score, .. } => assert_eq!(*score, Some(13.0)),
            NodeData::Root { .. } => panic!("expected paper node"),
        }
    }

    #[test]
    fn json_shape_is_tagged_tree() {
        let mut graph = PaperGraph::new("q");
        graph.add_paper(paper("a"), None);
        let json: serde_json::Value =
            serde_json::from_str(&graph.to_json().expect("json")).expect("parse");
        assert_eq!(json["id"], "root");
        assert_eq!(json["type"], "root");
        assert_eq!(json["query"], "q");
        assert_eq!(json["children"][0]["type"], "paper");
        assert_eq!(json["children"][0]["paper"]["title"], "Title a");
        assert!(json["children"][0].get("score").is_none());
    }
}
