//! HTTP clients for paper sources.
//!
//! Two profiles share one builder. The arXiv API asks clients to identify
//! themselves, so [`ClientProfile::Api`] sends a stable crate User-Agent.
//! Google Scholar serves CAPTCHAs to anything that does not look like a
//! browser, so [`ClientProfile::Browser`] rotates browser User-Agents and
//! keeps consent cookies.

use std::borrow::Cow;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// User-Agent sent to documented APIs.
pub const API_USER_AGENT: &str = concat!("paper-search/", env!("CARGO_PKG_VERSION"));

/// Browser User-Agent strings for scraped sources.
const BROWSER_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
];

/// How a source wants its client configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientProfile {
    /// Documented API: stable User-Agent, no cookies.
    Api,
    /// Scraped HTML: rotating browser User-Agent, cookie store.
    Browser,
}

/// Build a [`reqwest::Client`] for `profile`.
///
/// `config.user_agent` overrides the profile's User-Agent. The timeout comes
/// from `config.timeout_seconds`.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(
    config: &SearchConfig,
    profile: ClientProfile,
) -> Result<reqwest::Client, SearchError> {
    let builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(user_agent_for(config, profile).into_owned())
        .redirect(reqwest::redirect::Policy::limited(5));

    let builder = match profile {
        ClientProfile::Api => builder,
        ClientProfile::Browser => builder.cookie_store(true),
    };

    builder
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

fn user_agent_for(config: &SearchConfig, profile: ClientProfile) -> Cow<'static, str> {
    if let Some(custom) = &config.user_agent {
        return Cow::Owned(custom.clone());
    }
    match profile {
        ClientProfile::Api => Cow::Borrowed(API_USER_AGENT),
        ClientProfile::Browser => Cow::Borrowed(browser_user_agent()),
    }
}

/// Pick a browser User-Agent at random.
pub fn browser_user_agent() -> &'static str {
    BROWSER_USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(BROWSER_USER_AGENTS[0])
}

/// Map a non-success status from `source` into a [`SearchError`].
///
/// 429 and 503 are how both arXiv and Scholar signal throttling.
pub fn status_error(source: &str, status: reqwest::StatusCode) -> SearchError {
    match status.as_u16() {
        429 | 503 => SearchError::RateLimited(format!("{source} returned HTTP {status}")),
        _ => SearchError::Http(format!("{source} HTTP error: {status}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_profile_identifies_crate() {
        let config = SearchConfig::default();
        let ua = user_agent_for(&config, ClientProfile::Api);
        assert!(ua.starts_with("paper-search/"));
    }

    #[test]
    fn browser_profile_uses_rotation_list() {
        let config = SearchConfig::default();
        let ua = user_agent_for(&config, ClientProfile::Browser);
        assert!(BROWSER_USER_AGENTS.contains(&ua.as_ref()));
    }

    #[test]
    fn custom_user_agent_wins_for_both_profiles() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert_eq!(user_agent_for(&config, ClientProfile::Api), "CustomBot/1.0");
        assert_eq!(
            user_agent_for(&config, ClientProfile::Browser),
            "CustomBot/1.0"
        );
    }

    #[test]
    fn both_profiles_build() {
        let config = SearchConfig::default();
        assert!(build_client(&config, ClientProfile::Api).is_ok());
        assert!(build_client(&config, ClientProfile::Browser).is_ok());
    }

    #[test]
    fn throttling_statuses_map_to_rate_limited() {
        let err = status_error("arXiv", reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert!(matches!(err, SearchError::RateLimited(_)));
        let err = status_error("arXiv", reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert!(matches!(err, SearchError::RateLimited(_)));
    }

    #[test]
    fn other_statuses_map_to_http() {
        let err = status_error("Google Scholar", reqwest::StatusCode::NOT_FOUND);
        assert!(matches!(err, SearchError::Http(_)));
        assert!(err.to_string().contains("404"));
    }
}
