// src/github/pages.rs
// =============================================================================
// This module fetches the public repository listing, one page at a time.
//
// GitHub's `GET /repositories` endpoint is paginated through the `Link`
// response header:
//
//   Link: <https://api.github.com/repositories?since=369>; rel="next", ...
//
// We take the first URL in that header (the part before the first `;`,
// without the angle brackets) and use it as the address of the next page.
//
// Rust concepts:
// - serde: Deserializing JSON straight into our own structs
// - Streams: An async iterator of pages, fetched only when asked for
// =============================================================================

use futures::stream::{self, Stream};
use reqwest::header::LINK;
use serde::Deserialize;
use tracing::{debug, info};

use super::{FetchError, GithubClient};

/// One entry of the repository listing.
///
/// GitHub sends a lot more fields; serde ignores the ones we don't name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
}

/// One page of the listing plus the address of the page after it
#[derive(Debug, Clone)]
pub struct RepoPage {
    pub repositories: Vec<Repository>,
    pub next_link: String,
}

// Extracts the next-page URL from a Link header value
//
// Example:
//   "<https://api.github.com/repositories?since=369>; rel=\"next\""
//   -> Some("https://api.github.com/repositories?since=369")
pub fn parse_next_link(header: &str) -> Option<String> {
    let first = header.split(';').next()?;
    let link: String = first.chars().filter(|c| *c != '<' && *c != '>').collect();
    let link = link.trim();

    if link.is_empty() {
        None
    } else {
        Some(link.to_string())
    }
}

// Fetches a single page of the listing
//
// Parameters:
//   client: our GitHub client
//   next_link: the page to fetch, or None for the first page
//
// A single attempt is made. Non-2xx responses, responses without a Link
// header and undecodable bodies are all errors.
pub async fn fetch_page(
    client: &GithubClient,
    next_link: Option<&str>,
) -> Result<RepoPage, FetchError> {
    let url = match next_link {
        Some(link) => link.to_string(),
        None => client.listing_url(),
    };

    info!(url = %url, "fetching repository page");

    let response = client
        .http
        .get(&url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
        });
    }

    let next_link = response
        .headers()
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_next_link)
        .ok_or_else(|| FetchError::MissingLink { url: url.clone() })?;

    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

    let repositories: Vec<Repository> =
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.clone(),
            source,
        })?;

    debug!(url = %url, count = repositories.len(), next = %next_link, "page fetched");

    Ok(RepoPage {
        repositories,
        next_link,
    })
}

/// Streams `count` pages, each request following the previous page's link.
///
/// Pages are fetched lazily and strictly one after the other. The stream
/// ends after the first error, so a caller can keep whatever came before it.
pub fn pages(
    client: &GithubClient,
    count: usize,
) -> impl Stream<Item = Result<RepoPage, FetchError>> + '_ {
    stream::try_unfold((0usize, None::<String>), move |(fetched, next)| async move {
        if fetched >= count {
            return Ok::<_, FetchError>(None);
        }

        let page = fetch_page(client, next.as_deref()).await?;
        let following = Some(page.next_link.clone());
        Ok(Some((page, (fetched + 1, following))))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GithubConfig;
    use futures::TryStreamExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GithubClient {
        GithubClient::new(GithubConfig {
            api_url: server.uri(),
            ..GithubConfig::default()
        })
        .unwrap()
    }

    fn repos_json(names: &[&str]) -> serde_json::Value {
        let repos: Vec<_> = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "id": 1,
                    "name": name,
                    "full_name": format!("octo/{}", name),
                    "html_url": format!("https://github.com/octo/{}", name),
                    "private": false,
                })
            })
            .collect();
        serde_json::Value::Array(repos)
    }

    #[test]
    fn test_parse_next_link() {
        let header = r#"<https://api.github.com/repositories?since=369>; rel="next", <https://api.github.com/repositories{?since}>; rel="first""#;
        assert_eq!(
            parse_next_link(header),
            Some("https://api.github.com/repositories?since=369".to_string())
        );
    }

    #[test]
    fn test_parse_next_link_empty() {
        assert_eq!(parse_next_link(""), None);
        assert_eq!(parse_next_link("<>; rel=\"next\""), None);
    }

    #[test]
    fn test_repository_ignores_extra_fields() {
        let repo: Repository = serde_json::from_value(serde_json::json!({
            "name": "grit",
            "html_url": "https://github.com/mojombo/grit",
            "owner": { "login": "mojombo" },
            "stargazers_count": 12
        }))
        .unwrap();
        assert_eq!(repo.name, "grit");
        assert_eq!(repo.html_url, "https://github.com/mojombo/grit");
    }

    #[tokio::test]
    async fn test_fetch_first_page() {
        let server = MockServer::start().await;
        let next = format!("{}/repositories?since=2", server.uri());

        Mock::given(method("GET"))
            .and(path("/repositories"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!("<{}>; rel=\"next\"", next).as_str())
                    .set_body_json(repos_json(&["grit", "merb"])),
            )
            .mount(&server)
            .await;

        let page = fetch_page(&client_for(&server), None).await.unwrap();
        assert_eq!(page.repositories.len(), 2);
        assert_eq!(page.repositories[1].name, "merb");
        assert_eq!(page.next_link, next);
    }

    #[tokio::test]
    async fn test_missing_link_header_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repositories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repos_json(&["grit"])))
            .mount(&server)
            .await;

        let result = fetch_page(&client_for(&server), None).await;
        assert!(matches!(result, Err(FetchError::MissingLink { .. })));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repositories"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = fetch_page(&client_for(&server), None).await;
        assert!(matches!(result, Err(FetchError::Status { status: 403, .. })));
    }

    #[tokio::test]
    async fn test_pages_follow_link_header() {
        let server = MockServer::start().await;
        let second = format!("{}/listing/2", server.uri());
        let third = format!("{}/listing/3", server.uri());

        Mock::given(method("GET"))
            .and(path("/repositories"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!("<{}>; rel=\"next\"", second).as_str())
                    .set_body_json(repos_json(&["a", "b"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/listing/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!("<{}>; rel=\"next\"", third).as_str())
                    .set_body_json(repos_json(&["c", "d"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let fetched: Vec<RepoPage> = pages(&client, 2).try_collect().await.unwrap();

        let names: Vec<_> = fetched
            .iter()
            .flat_map(|p| p.repositories.iter().map(|r| r.name.as_str()))
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(fetched[1].next_link, third);
    }
}
