//! Google Scholar source: broad coverage, aggressive bot detection.
//!
//! There is no official API, so result pages are scraped with CSS
//! selectors. Scholar serves a CAPTCHA page once it decides the client
//! is automated; that is surfaced as [`SearchError::RateLimited`].

use chrono::{TimeZone, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::PaperSource;
use crate::types::{Paper, SearchSource};

/// Default Google Scholar host.
pub const SCHOLAR_URL: &str = "https://scholar.google.com";

/// Scholar never returns more than this many results per page.
const MAX_PAGE_SIZE: usize = 20;

/// Markers that identify Scholar's bot-detection interstitial.
const CAPTCHA_MARKERS: &[&str] = &["gs_captcha", "captcha-form", "unusual traffic"];

/// Google Scholar HTML scraper.
#[derive(Debug, Clone)]
pub struct ScholarSource {
    base_url: String,
}

impl Default for ScholarSource {
    fn default() -> Self {
        Self {
            base_url: SCHOLAR_URL.to_string(),
        }
    }
}

impl ScholarSource {
    /// Create a source pointed at the public Scholar site.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the source at a different host (test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl PaperSource for ScholarSource {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &SearchConfig,
    ) -> Result<Vec<Paper>, SearchError> {
        tracing::trace!(query, "Google Scholar search");

        let client = http::build_client(config, http::ClientProfile::Browser)?;
        let num = max_results.min(MAX_PAGE_SIZE).to_string();
        let url = format!("{}/scholar", self.base_url.trim_end_matches('/'));

        let response = client
            .get(&url)
            .query(&[("q", query), ("hl", "en"), ("num", num.as_str())])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("Google Scholar request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(http::status_error("Google Scholar", status));
        }

        let html = response.text().await.map_err(|e| {
            SearchError::Http(format!("Google Scholar response read failed: {e}"))
        })?;

        tracing::trace!(bytes = html.len(), "Google Scholar response received");

        parse_scholar_html(&html, &self.base_url, max_results)
    }

    fn kind(&self) -> SearchSource {
        SearchSource::GoogleScholar
    }
}

/// Parse a Scholar result page into papers.
///
/// Relative links are resolved against `base_url`.
pub(crate) fn parse_scholar_html(
    html: &str,
    base_url: &str,
    max_results: usize,
) -> Result<Vec<Paper>, SearchError> {
    if CAPTCHA_MARKERS.iter().any(|marker| html.contains(marker)) {
        return Err(SearchError::RateLimited(
            "Google Scholar served a CAPTCHA page".into(),
        ));
    }

    let document = Html::parse_document(html);

    let result_sel = Selector::parse(".gs_r.gs_or")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("h3.gs_rt")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let link_sel = Selector::parse("a")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let eprint_sel = Selector::parse(".gs_or_ggsm a")
        .map_err(|e| SearchError::Parse(format!("invalid eprint selector: {e:?}")))?;
    let byline_sel = Selector::parse(".gs_a")
        .map_err(|e| SearchError::Parse(format!("invalid byline selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".gs_rs")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let base = Url::parse(base_url).ok();
    let mut papers = Vec::new();

    for element in document.select(&result_sel) {
        let title_el = match element.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };

        // Prefer the anchor text; citation-only entries have no anchor and
        // carry a "[CITATION]" tag we strip.
        let title_link = title_el.select(&link_sel).next();
        let title = match title_link {
            Some(a) => element_text(a),
            None => strip_tags(&element_text(title_el)),
        };
        if title.is_empty() {
            continue;
        }

        let publisher_url = title_link.and_then(|a| a.value().attr("href"));
        let eprint_url = element
            .select(&eprint_sel)
            .next()
            .and_then(|a| a.value().attr("href"));
        let url = eprint_url
            .or(publisher_url)
            .map(|href| resolve(base.as_ref(), href))
            .unwrap_or_default();

        let byline = element
            .select(&byline_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let (authors, year) = parse_byline(&byline);

        let summary = element
            .select(&snippet_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let id = match element.value().attr("data-cid") {
            Some(cid) if !cid.is_empty() => format!("gs_{cid}"),
            _ => format!("gs_{}", title.chars().take(20).collect::<String>()),
        };

        papers.push(Paper {
            id,
            title,
            summary,
            authors,
            published: year.and_then(|y| Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).single()),
            url,
            source: SearchSource::GoogleScholar,
        });

        if papers.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = papers.len(), "Google Scholar results parsed");
    Ok(papers)
}

/// Split a Scholar byline (`"A Author, B Author - Venue, 2023 - host"`)
/// into author names and publication year.
fn parse_byline(byline: &str) -> (Vec<String>, Option<i32>) {
    let mut segments = byline.split(" - ");
    let authors = segments
        .next()
        .unwrap_or_default()
        .split(',')
        .map(|name| name.trim().trim_end_matches('…').trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let year = segments
        .flat_map(|segment| segment.split(|c: char| !c.is_ascii_digit()))
        .filter(|token| token.len() == 4)
        .filter_map(|token| token.parse::<i32>().ok())
        .find(|y| (1900..=2100).contains(y));

    (authors, year)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove bracketed type tags such as `[PDF]` or `[CITATION]`.
fn strip_tags(title: &str) -> String {
    title
        .split_whitespace()
        .filter(|word| !(word.starts_with('[') && word.ends_with(']')))
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve(base: Option<&Url>, href: &str) -> String {
    match base.and_then(|b| b.join(href).ok()) {
        Some(url) => url.to_string(),
        None => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_SCHOLAR_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div id="gs_res_ccl_mid">
  <div class="gs_r gs_or gs_scl" data-cid="abc123">
    <div class="gs_ggs gs_fl"><div class="gs_or_ggsm"><a href="https://arxiv.org/pdf/2301.00001">[PDF] arxiv.org</a></div></div>
    <div class="gs_ri">
      <h3 class="gs_rt"><span class="gs_ctg2">[PDF]</span> <a href="https://example.org/paper1">Graph Neural
        Networks: A Review</a></h3>
      <div class="gs_a">J Zhou, G Cui, S Hu - AI open, 2020 - Elsevier</div>
      <div class="gs_rs">Lots of learning tasks require dealing with graph data.</div>
    </div>
  </div>
  <div class="gs_r gs_or gs_scl" data-cid="def456">
    <div class="gs_ri">
      <h3 class="gs_rt"><a href="/citations?view=1">Deep Learning on Graphs</a></h3>
      <div class="gs_a">Y Ma, J Tang… - 2021 - books.google.com</div>
      <div class="gs_rs">A comprehensive introduction.</div>
    </div>
  </div>
  <div class="gs_r gs_or gs_scl" data-cid="">
    <div class="gs_ri">
      <h3 class="gs_rt"><span class="gs_ctg2">[CITATION]</span> Spectral networks on graphs</h3>
      <div class="gs_a">J Bruna - arXiv preprint</div>
    </div>
  </div>
</div>
</body>
</html>"#;

    #[test]
    fn parse_mock_html_returns_results() {
        let papers =
            parse_scholar_html(MOCK_SCHOLAR_HTML, SCHOLAR_URL, 10).expect("should parse");
        assert_eq!(papers.len(), 3);

        assert_eq!(papers[0].id, "gs_abc123");
        assert_eq!(papers[0].title, "Graph Neural Networks: A Review");
        assert_eq!(papers[0].authors, vec!["J Zhou", "G Cui", "S Hu"]);
        assert!(papers[0].summary.contains("graph data"));
        assert_eq!(papers[0].source, SearchSource::GoogleScholar);
    }

    #[test]
    fn eprint_link_preferred_over_publisher_link() {
        let papers =
            parse_scholar_html(MOCK_SCHOLAR_HTML, SCHOLAR_URL, 10).expect("should parse");
        assert_eq!(papers[0].url, "https://arxiv.org/pdf/2301.00001");
    }

    #[test]
    fn relative_links_resolved_against_base() {
        let papers =
            parse_scholar_html(MOCK_SCHOLAR_HTML, SCHOLAR_URL, 10).expect("should parse");
        assert_eq!(papers[1].url, "https://scholar.google.com/citations?view=1");
    }

    #[test]
    fn year_becomes_january_first_timestamp() {
        let papers =
            parse_scholar_html(MOCK_SCHOLAR_HTML, SCHOLAR_URL, 10).expect("should parse");
        assert_eq!(
            papers[0].published.map(|d| d.to_rfc3339()),
            Some("2020-01-01T00:00:00+00:00".to_string())
        );
        assert_eq!(
            papers[1].published.map(|d| d.to_rfc3339()),
            Some("2021-01-01T00:00:00+00:00".to_string())
        );
        assert!(papers[2].published.is_none());
    }

    #[test]
    fn citation_only_entry_uses_heading_text() {
        let papers =
            parse_scholar_html(MOCK_SCHOLAR_HTML, SCHOLAR_URL, 10).expect("should parse");
        assert_eq!(papers[2].title, "Spectral networks on graphs");
        assert!(papers[2].url.is_empty());
        assert_eq!(papers[2].id, "gs_Spectral networks on");
    }

    #[test]
    fn parse_respects_max_results() {
        let papers = parse_scholar_html(MOCK_SCHOLAR_HTML, SCHOLAR_URL, 1).expect("should parse");
        assert_eq!(papers.len(), 1);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let papers = parse_scholar_html("<html><body></body></html>", SCHOLAR_URL, 10)
            .expect("should parse");
        assert!(papers.is_empty());
    }

    #[test]
    fn captcha_page_is_rate_limited() {
        let html = r#"<html><body><form id="captcha-form">unusual traffic</form></body></html>"#;
        let err = parse_scholar_html(html, SCHOLAR_URL, 10).unwrap_err();
        assert!(matches!(err, SearchError::RateLimited(_)));
    }

    #[test]
    fn byline_with_ellipsis_author() {
        let (authors, year) = parse_byline("Y Ma, J Tang… - 2021 - books.google.com");
        assert_eq!(authors, vec!["Y Ma", "J Tang"]);
        assert_eq!(year, Some(2021));
    }

    #[test]
    fn byline_without_year() {
        let (authors, year) = parse_byline("J Bruna - arXiv preprint");
        assert_eq!(authors, vec!["J Bruna"]);
        assert_eq!(year, None);
    }

    #[test]
    fn kind_is_google_scholar() {
        assert_eq!(ScholarSource::new().kind(), SearchSource::GoogleScholar);
    }

    #[tokio::test]
    #[ignore] // live network; run with `cargo test -- --ignored`
    async fn live_scholar_search() {
        let config = SearchConfig::default();
        let papers = ScholarSource::new()
            .search("large language models for code generation", 3, &config)
            .await
            .expect("live search should work");
        assert!(!papers.is_empty());
    }
}
