//! arXiv source: the public Atom API at `export.arxiv.org`.
//!
//! No key required. Results are requested sorted by submission date,
//! newest first. An optional date filter narrows the search to recent
//! submissions and falls back to the unfiltered query when that finds
//! nothing.

use chrono::{DateTime, Utc};
use roxmltree::{Document, Node};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::PaperSource;
use crate::types::{Paper, SearchSource};

/// Default arXiv API host.
pub const ARXIV_API_URL: &str = "https://export.arxiv.org";

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// arXiv Atom API client.
#[derive(Debug, Clone)]
pub struct ArxivSource {
    base_url: String,
}

impl Default for ArxivSource {
    fn default() -> Self {
        Self {
            base_url: ARXIV_API_URL.to_string(),
        }
    }
}

impl ArxivSource {
    /// Create a source pointed at the public arXiv API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the source at a different host (mirrors, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        search_query: &str,
        max_results: usize,
    ) -> Result<Vec<Paper>, SearchError> {
        let url = format!("{}/api/query", self.base_url.trim_end_matches('/'));
        let max = max_results.to_string();

        tracing::trace!(search_query, max_results, "arXiv query");

        let response = client
            .get(&url)
            .query(&[
                ("search_query", search_query),
                ("start", "0"),
                ("max_results", max.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .header("Accept", "application/atom+xml")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("arXiv request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(http::status_error("arXiv", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("arXiv response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "arXiv response received");

        parse_arxiv_feed(&body, max_results)
    }
}

impl PaperSource for ArxivSource {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &SearchConfig,
    ) -> Result<Vec<Paper>, SearchError> {
        let client = http::build_client(config, http::ClientProfile::Api)?;

        if let Some(year) = config.submitted_since_year {
            let dated = date_filtered_query(query, year);
            let papers = self.fetch(&client, &dated, max_results).await?;
            if !papers.is_empty() {
                return Ok(papers);
            }
            tracing::debug!(year, "no recent arXiv submissions, retrying without date filter");
        }

        self.fetch(&client, query, max_results).await
    }

    fn kind(&self) -> SearchSource {
        SearchSource::Arxiv
    }
}

/// Restrict `query` to submissions from January 1st of `year` onward.
pub(crate) fn date_filtered_query(query: &str, year: i32) -> String {
    format!("({query}) AND submittedDate:[{year}01010000 TO 209912312359]")
}

/// Parse an arXiv Atom feed into papers.
///
/// Extracted as a separate function for testability with fixture XML.
pub(crate) fn parse_arxiv_feed(xml: &str, max_results: usize) -> Result<Vec<Paper>, SearchError> {
    let document = Document::parse(xml)
        .map_err(|e| SearchError::Parse(format!("invalid arXiv feed: {e}")))?;

    let feed = document.root_element();
    if !feed.has_tag_name((ATOM_NS, "feed")) {
        return Err(SearchError::Parse(format!(
            "expected Atom feed, found <{}>",
            feed.tag_name().name()
        )));
    }

    let mut papers = Vec::new();

    for entry in feed.children().filter(|n| n.has_tag_name((ATOM_NS, "entry"))) {
        let id = child_text(entry, "id");

        // arXiv reports malformed queries as a single entry under /api/errors.
        if id.contains("/api/errors") {
            let message = collapse_whitespace(&child_text(entry, "summary"));
            return Err(SearchError::Provider(format!("arXiv rejected query: {message}")));
        }

        let title = collapse_whitespace(&child_text(entry, "title"));
        if id.is_empty() || title.is_empty() {
            continue;
        }

        let authors = entry
            .children()
            .filter(|n| n.has_tag_name((ATOM_NS, "author")))
            .map(|author| collapse_whitespace(&child_text(author, "name")))
            .filter(|name| !name.is_empty())
            .collect();

        let published = DateTime::parse_from_rfc3339(child_text(entry, "published").trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc));

        let url = pdf_link(entry).unwrap_or_else(|| id.clone());

        papers.push(Paper {
            id,
            title,
            summary: collapse_whitespace(&child_text(entry, "summary")),
            authors,
            published,
            url,
            source: SearchSource::Arxiv,
        });

        if papers.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = papers.len(), "arXiv entries parsed");
    Ok(papers)
}

/// Text of the first Atom child element called `name`, or empty.
fn child_text(node: Node<'_, '_>, name: &str) -> String {
    node.children()
        .find(|n| n.has_tag_name((ATOM_NS, name)))
        .and_then(|n| n.text())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// The PDF link of an entry, falling back to the `alternate` landing page.
fn pdf_link(entry: Node<'_, '_>) -> Option<String> {
    let links: Vec<Node<'_, '_>> = entry
        .children()
        .filter(|n| n.has_tag_name((ATOM_NS, "link")))
        .collect();

    links
        .iter()
        .find(|l| l.attribute("title") == Some("pdf"))
        .or_else(|| links.iter().find(|l| l.attribute("rel") == Some("alternate")))
        .and_then(|l| l.attribute("href"))
        .map(str::to_string)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
