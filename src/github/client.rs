// src/github/client.rs
// =============================================================================
// A thin wrapper around reqwest::Client that knows where GitHub lives.
//
// The API base and the raw-content host are configurable so tests can point
// them at a local mock server instead of the real GitHub.
// =============================================================================

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;

use super::FetchError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_HOST: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_BRANCH: &str = "master";

// GitHub rejects API requests that carry no User-Agent
const USER_AGENT: &str = concat!("readme-speller/", env!("CARGO_PKG_VERSION"));

/// Endpoints and credentials for one session.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    pub raw_host: String,
    /// Branch used when probing for READMEs. Never auto-detected.
    pub branch: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            raw_host: DEFAULT_RAW_HOST.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    pub(crate) http: Client,
    pub(crate) config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = &config.token {
            // A token with characters that can't go in a header is simply not sent
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("ignoring GitHub token with invalid characters"),
            }
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http, config })
    }

    /// `{api_url}/repositories` - the first page of the public listing
    pub fn listing_url(&self) -> String {
        format!("{}/repositories", self.config.api_url.trim_end_matches('/'))
    }
}
