// src/github/readme.rs
// =============================================================================
// This module finds and downloads a repository's README.
//
// Strategy:
// - Rewrite the repository's web URL onto the raw-content host
//     https://github.com/owner/repo -> https://raw.githubusercontent.com/owner/repo
// - Probe a fixed list of filenames on the configured branch ("master")
// - The first probe that does NOT answer 404 wins
//
// The candidate order matters: README.md beats readme.md even when both
// exist, so candidates are checked one by one and probing stops at the
// first hit. The raw host needs no token and does not count against the
// API rate limit.
//
// Known limitation: the branch is never detected. Repositories whose
// default branch is not the configured one will have no README found.
// =============================================================================

use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;

use super::{FetchError, GithubClient};

/// Filenames probed for a README, in order
pub const README_CANDIDATES: [&str; 6] = [
    "README.md",
    "README.MD",
    "readme.md",
    "readme.MD",
    "README",
    "readme",
];

/// A downloaded README
#[derive(Debug, Clone)]
pub struct Readme {
    pub url: String,
    pub text: String,
}

// Maps a repository web URL onto the raw-content host
//
// Example:
//   ("https://github.com/rust-lang/rust", "https://raw.githubusercontent.com")
//   -> "https://raw.githubusercontent.com/rust-lang/rust"
pub fn raw_base_url(repo_url: &str, raw_host: &str) -> Result<String, FetchError> {
    let bad = || FetchError::BadRepoUrl {
        url: repo_url.to_string(),
    };

    let parsed = Url::parse(repo_url).map_err(|_| bad())?;
    let path = parsed.path().trim_end_matches('/');

    if path.is_empty() {
        return Err(bad());
    }

    Ok(format!("{}{}", raw_host.trim_end_matches('/'), path))
}

// Returns the URL of the first candidate README that exists, or None
//
// A 404 means "not there"; any other status counts as found.
// Transport errors abort the search.
pub async fn locate_readme(
    client: &GithubClient,
    repo_url: &str,
) -> Result<Option<String>, FetchError> {
    let base = raw_base_url(repo_url, &client.config.raw_host)?;

    for file in README_CANDIDATES {
        let candidate = format!("{}/{}/{}", base, client.config.branch, file);

        if !is_404(client, &candidate).await? {
            return Ok(Some(candidate));
        }
        debug!(url = %candidate, "no README at candidate");
    }

    Ok(None)
}

// Locates the README and downloads its body
//
// Returns Ok(None) when no candidate exists.
pub async fn fetch_readme(
    client: &GithubClient,
    repo_url: &str,
) -> Result<Option<Readme>, FetchError> {
    let url = match locate_readme(client, repo_url).await? {
        Some(url) => url,
        None => return Ok(None),
    };

    info!(url = %url, "downloading README");

    let text = client
        .http
        .get(&url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

    Ok(Some(Readme { url, text }))
}

async fn is_404(client: &GithubClient, url: &str) -> Result<bool, FetchError> {
    let response = client
        .http
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    Ok(response.status() == StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GithubConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GithubClient {
        GithubClient::new(GithubConfig {
            raw_host: server.uri(),
            ..GithubConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_raw_base_url() {
        let url = raw_base_url(
            "https://github.com/rust-lang/rust",
            "https://raw.githubusercontent.com",
        )
        .unwrap();
        assert_eq!(url, "https://raw.githubusercontent.com/rust-lang/rust");
    }

    #[test]
    fn test_raw_base_url_trailing_slashes() {
        let url = raw_base_url("https://github.com/user/repo/", "http://localhost:9/").unwrap();
        assert_eq!(url, "http://localhost:9/user/repo");
    }

    #[test]
    fn test_raw_base_url_invalid() {
        assert!(raw_base_url("not a url", "https://raw.githubusercontent.com").is_err());
        assert!(raw_base_url("https://github.com/", "https://raw.githubusercontent.com").is_err());
    }

    #[tokio::test]
    async fn test_first_existing_candidate_wins() {
        let server = MockServer::start().await;

        // readme.md and README both exist; readme.md comes first in the list
        Mock::given(method("GET"))
            .and(path("/octo/spoon/master/readme.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/octo/spoon/master/README"))
            .respond_with(ResponseTemplate::new(200).set_body_string("other"))
            .expect(0)
            .mount(&server)
            .await;
        // Anything without a mock answers 404

        let found = locate_readme(&client_for(&server), "https://github.com/octo/spoon")
            .await
            .unwrap();
        assert_eq!(
            found,
            Some(format!("{}/octo/spoon/master/readme.md", server.uri()))
        );

        // Probing stopped at the hit: README.md, README.MD, readme.md
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn test_all_candidates_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(6)
            .mount(&server)
            .await;

        let readme = fetch_readme(&client_for(&server), "https://github.com/octo/empty")
            .await
            .unwrap();
        assert!(readme.is_none());
    }

    #[tokio::test]
    async fn test_non_404_error_counts_as_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/octo/odd/master/README.md"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let found = locate_readme(&client_for(&server), "https://github.com/octo/odd")
            .await
            .unwrap();
        assert!(found.unwrap().ends_with("/master/README.md"));
    }

    #[tokio::test]
    async fn test_fetch_readme_downloads_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/octo/spoon/master/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Spoon\nA usefull spoon"))
            .mount(&server)
            .await;

        let readme = fetch_readme(&client_for(&server), "https://github.com/octo/spoon")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(readme.text, "# Spoon\nA usefull spoon");
        assert!(readme.url.ends_with("/octo/spoon/master/README.md"));
    }
}
