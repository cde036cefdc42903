use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const USER_AGENT: &str = "RepoReel-App";

const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum GitHubError {
    /// GitHub answers 403 when the unauthenticated search quota runs out
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    #[error("GitHub API error: {status}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Repository as returned by the search endpoint (native field names)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub open_issues_count: u32,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub owner: GitHubOwner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// Body of `GET /search/repositories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<GitHubRepo>,
}

/// Query parameters for one search page, already in wire form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Composed `q` string, e.g. `stars:>100 language:Rust created:>2024-01-01`
    pub query: String,
    pub sort: String,
    pub order: String,
    pub page: u32,
    pub per_page: u32,
}

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE, USER_AGENT, DEFAULT_TIMEOUT)
    }

    /// Point the client somewhere else (GitHub Enterprise, or a mock server in tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of repository search results.
    ///
    /// No retries here: a 403 is reported as [`GitHubError::RateLimitExceeded`]
    /// and everything else non-2xx as [`GitHubError::Status`].
    pub async fn search_repositories(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = format!("{}/search/repositories", self.base_url);
        let page = request.page.to_string();
        let per_page = request.per_page.to_string();

        debug!(
            "Fetching from GitHub API: {} q={:?} sort={} order={} page={} per_page={}",
            url, request.query, request.sort, request.order, page, per_page
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_MEDIA_TYPE)
            .query(&[
                ("q", request.query.as_str()),
                ("sort", request.sort.as_str()),
                ("order", request.order.as_str()),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(GitHubError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;
        debug!(
            "GitHub returned {} of {} results",
            parsed.items.len(),
            parsed.total_count
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "id": 1296269,
                    "name": "ripgrep",
                    "full_name": "BurntSushi/ripgrep",
                    "description": "recursively searches directories",
                    "html_url": "https://github.com/BurntSushi/ripgrep",
                    "stargazers_count": 48000,
                    "forks_count": 2000,
                    "open_issues_count": 120,
                    "language": "Rust",
                    "updated_at": "2024-05-01T10:00:00Z",
                    "created_at": "2016-03-11T19:00:00Z",
                    "topics": ["cli", "search"],
                    "owner": {
                        "login": "BurntSushi",
                        "avatar_url": "https://avatars.githubusercontent.com/u/456674",
                        "html_url": "https://github.com/BurntSushi"
                    }
                },
                {
                    "id": 42,
                    "name": "dotfiles",
                    "full_name": "someone/dotfiles",
                    "description": null,
                    "html_url": "https://github.com/someone/dotfiles",
                    "stargazers_count": 150,
                    "forks_count": 3,
                    "open_issues_count": 0,
                    "language": null,
                    "updated_at": "2024-04-01T10:00:00Z",
                    "created_at": "2024-01-01T00:00:00Z",
                    "owner": {
                        "login": "someone",
                        "avatar_url": "",
                        "html_url": "https://github.com/someone"
                    }
                }
            ]
        })
    }

    fn request() -> SearchRequest {
        SearchRequest {
            query: "stars:>100 language:Rust".to_string(),
            sort: "stars".to_string(),
            order: "desc".to_string(),
            page: 2,
            per_page: 10,
        }
    }

    fn client_for(server: &MockServer) -> GitHubClient {
        GitHubClient::with_base_url(server.uri(), USER_AGENT, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_expected_request_and_decodes_items() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "stars:>100 language:Rust"))
            .and(query_param("sort", "stars"))
            .and(query_param("order", "desc"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "10"))
            .and(header("accept", ACCEPT_MEDIA_TYPE))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .search_repositories(&request())
            .await
            .unwrap();

        assert_eq!(response.total_count, 2);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].full_name, "BurntSushi/ripgrep");
        assert_eq!(response.items[0].topics, vec!["cli", "search"]);
        // Missing topics default to empty
        assert!(response.items[1].topics.is_empty());
        assert_eq!(response.items[1].language, None);
    }

    #[tokio::test]
    async fn test_forbidden_is_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search_repositories(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn test_other_status_carries_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search_repositories(&request())
            .await
            .unwrap_err();
        match err {
            GitHubError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search_repositories(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::ParseError(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            GitHubClient::with_base_url("http://localhost:1234/", USER_AGENT, DEFAULT_TIMEOUT)
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }
}
