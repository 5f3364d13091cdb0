//! HTTP client for the GitHub REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::models::{ApiMessage, Profile, Repository};

/// Public GitHub API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Page size requested from the repository listing endpoint.
pub const REPOS_PER_PAGE: u32 = 100;

const USER_FALLBACK: &str = "Failed to fetch user info";
const REPOS_FALLBACK: &str = "Failed to fetch repositories";

/// Errors that can occur while talking to GitHub.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Non-success response; `message` is GitHub's own message when it sent one.
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Failed to reach GitHub: {0}")]
    Transport(String),

    #[error("Failed to decode GitHub response: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// The two read-only GitHub lookups the portfolio needs.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Look up a user profile.
    async fn user(&self, username: &str) -> Result<Profile, FetchError>;

    /// List up to [`REPOS_PER_PAGE`] public repositories, unsorted.
    async fn repositories(&self, username: &str) -> Result<Vec<Repository>, FetchError>;
}

/// Configuration for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub api_base: String,

    /// Per-request timeout (none by default)
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }
}

/// Unauthenticated GitHub REST client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: Url,
}

impl GitHubClient {
    /// Create a client with the GitHub v3 headers preset.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let api_base = Url::parse(&config.api_base).map_err(|e| {
            FetchError::Client(format!("Invalid API base {}: {}", config.api_base, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(FetchError::Client(format!(
                "Invalid API base {}",
                config.api_base
            )));
        }

        Ok(Self { http, api_base })
    }

    /// `api_base` joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn user_url(&self, username: &str) -> Url {
        self.endpoint(&["users", username])
    }

    fn repositories_url(&self, username: &str) -> Url {
        let mut url = self.endpoint(&["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &REPOS_PER_PAGE.to_string());
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        fallback: &str,
    ) -> Result<T, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiMessage>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.to_string());

            tracing::warn!("GitHub returned {} for {}: {}", status, url, message);

            return Err(FetchError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn user(&self, username: &str) -> Result<Profile, FetchError> {
        self.get_json(self.user_url(username), USER_FALLBACK).await
    }

    async fn repositories(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
        self.get_json(self.repositories_url(username), REPOS_FALLBACK)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Serve a tiny stand-in for the GitHub API on a random local port.
    async fn stub_api() -> String {
        let app = Router::new()
            .route(
                "/users/{username}",
                get(|Path(username): Path<String>| async move {
                    match username.as_str() {
                        "ghost" => (
                            StatusCode::NOT_FOUND,
                            Json(json!({ "message": "Not Found" })),
                        )
                            .into_response(),
                        "silent" => StatusCode::FORBIDDEN.into_response(),
                        _ => Json(json!({
                            "login": username,
                            "name": null,
                            "avatar_url": "https://avatars.example/u.png",
                            "html_url": format!("https://github.com/{}", username),
                        }))
                        .into_response(),
                    }
                }),
            )
            .route(
                "/users/{username}/repos",
                get(
                    |Path(username): Path<String>,
                     Query(query): Query<HashMap<String, String>>| async move {
                        if query.get("per_page").map(String::as_str) != Some("100") {
                            return StatusCode::BAD_REQUEST.into_response();
                        }
                        Json(json!([
                            {
                                "name": "calc",
                                "description": null,
                                "stargazers_count": 5,
                                "html_url": format!("https://github.com/{}/calc", username),
                                "homepage": null
                            },
                            {
                                "name": "web",
                                "description": "Site",
                                "stargazers_count": 8,
                                "html_url": format!("https://github.com/{}/web", username),
                                "homepage": "https://example.dev"
                            }
                        ]))
                        .into_response()
                    },
                ),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/", addr)
    }

    async fn client() -> GitHubClient {
        GitHubClient::new(ClientConfig {
            api_base: stub_api().await,
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[test]
    fn builds_endpoint_urls() {
        let client = GitHubClient::new(ClientConfig::default()).unwrap();

        assert_eq!(client.user_url("ada").as_str(), "https://api.github.com/users/ada");
        assert_eq!(
            client.repositories_url("ada").as_str(),
            "https://api.github.com/users/ada/repos?per_page=100"
        );
    }

    #[test]
    fn encodes_username_path_segment() {
        let client = GitHubClient::new(ClientConfig::default()).unwrap();

        assert_eq!(
            client.user_url("ada?x#y").as_str(),
            "https://api.github.com/users/ada%3Fx%23y"
        );
        assert_eq!(
            client.repositories_url("ada/x").as_str(),
            "https://api.github.com/users/ada%2Fx/repos?per_page=100"
        );
    }

    #[test]
    fn keeps_api_base_path_prefix() {
        let client = GitHubClient::new(ClientConfig {
            api_base: "https://ghe.example/api/v3/".to_string(),
            timeout: None,
        })
        .unwrap();

        assert_eq!(
            client.user_url("ada").as_str(),
            "https://ghe.example/api/v3/users/ada"
        );
    }

    #[test]
    fn rejects_invalid_api_base() {
        let err = GitHubClient::new(ClientConfig {
            api_base: "not a url".to_string(),
            timeout: None,
        })
        .unwrap_err();

        assert!(matches!(err, FetchError::Client(_)));
    }

    #[tokio::test]
    async fn fetches_user() {
        let profile = client().await.user("ada").await.unwrap();

        assert_eq!(profile.login, "ada");
        assert_eq!(profile.html_url, "https://github.com/ada");
    }

    #[tokio::test]
    async fn fetches_repositories_unsorted() {
        let repos = client().await.repositories("ada").await.unwrap();

        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["calc", "web"]);
    }

    #[tokio::test]
    async fn surfaces_api_message() {
        let err = client().await.user("ghost").await.unwrap_err();

        match err {
            FetchError::Remote { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn falls_back_to_generic_message() {
        let err = client().await.user("silent").await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch user info");
    }
}
