//! Core types for paper records and source identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single candidate paper returned by a paper source.
///
/// Records are produced by a [`crate::source::PaperSource`] and only read
/// by the ranker; nothing in this crate mutates them after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Source identifier (for arXiv, the entry URL such as
    /// `http://arxiv.org/abs/2401.01234v1`).
    pub id: String,
    /// Paper title with internal whitespace collapsed.
    pub title: String,
    /// Abstract or snippet text.
    pub summary: String,
    /// Author names in publication order.
    pub authors: Vec<String>,
    /// Publication timestamp, when the source reports one.
    pub published: Option<DateTime<Utc>>,
    /// Link to the PDF, or to the landing page when no PDF link exists.
    pub url: String,
    /// Which source returned this paper.
    pub source: SearchSource,
}

impl Paper {
    /// Author list joined for display and prompts, e.g. `"A. One, B. Two"`.
    pub fn authors_joined(&self) -> String {
        self.authors.join(", ")
    }
}

/// Supported paper sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    /// The arXiv Atom API. Free, no key, returns newest submissions first.
    #[default]
    Arxiv,
    /// Google Scholar result pages. Broader coverage, aggressive bot detection.
    GoogleScholar,
}

impl SearchSource {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arxiv => "arXiv",
            Self::GoogleScholar => "Google Scholar",
        }
    }

    /// Returns all available source variants.
    pub fn all() -> &'static [SearchSource] {
        &[Self::Arxiv, Self::GoogleScholar]
    }
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arxiv" => Ok(Self::Arxiv),
            "google_scholar" | "google-scholar" | "scholar" => Ok(Self::GoogleScholar),
            other => Err(format!(
                "unknown source `{other}` (expected arxiv or google_scholar)"
            )),
        }
    }
}
