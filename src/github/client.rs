use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode, Url};

use crate::error::{Error, Result};
use crate::github::api::GitHubApi;
use crate::github::rate_limit::{RateLimitSnapshot, RateLimitTracker};
use crate::models::{GitHubUser, Repository};

/// GitHub returns at most this many repositories per page; only the first page is fetched.
pub const REPOS_PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limit: RateLimitTracker,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(Self::default_headers())
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    /// Uses a preconfigured client. It should carry [`GitHubClient::default_headers`].
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            rate_limit: RateLimitTracker::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn default_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("repolens/", env!("CARGO_PKG_VERSION"))),
        );
        headers
    }

    /// Quota reported by the most recent response, if any.
    pub fn rate_limit(&self) -> Option<RateLimitSnapshot> {
        self.rate_limit.latest()
    }

    /// Base URL plus `segments`, each percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            Error::Config(format!("invalid GitHub API URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("GitHub API URL '{}' cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, credential: Option<&str>) -> Result<Response> {
        tracing::debug!("GET {} (authenticated: {})", url, credential.is_some_and(|t| !t.is_empty()));
        let mut request = self.client.get(url);

        if let Some(token) = credential.filter(|t| !t.is_empty()) {
            let mut value = header::HeaderValue::from_str(&format!("token {}", token))?;
            value.set_sensitive(true);
            request = request.header(header::AUTHORIZATION, value);
        }

        let response = request.send().await?;
        self.rate_limit.record(response.headers());
        Ok(response)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn fetch_user(&self, username: &str, credential: Option<&str>) -> Result<GitHubUser> {
        let url = self.endpoint(&["users", username])?;
        tracing::info!("Fetching user: {}", username);

        let response = self.get(url, credential).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("User fetch for {} failed: {}", username, status);
            return Err(user_fetch_error(username, status));
        }

        Ok(response.json().await?)
    }

    async fn fetch_repositories(
        &self,
        username: &str,
        credential: Option<&str>,
    ) -> Result<Vec<Repository>> {
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &REPOS_PER_PAGE.to_string());
        tracing::info!("Fetching repositories for: {}", username);

        let response = self.get(url, credential).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Repository fetch for {} failed: {}", username, status);
            return Err(Error::RepositoryFetch {
                status: status.to_string(),
            });
        }

        let repos: Vec<Repository> = response.json().await?;
        tracing::debug!("Fetched {} repositories for {}", repos.len(), username);
        Ok(repos)
    }
}

/// Maps a failed `GET /users/{username}` status to the error the user sees.
pub(crate) fn user_fetch_error(username: &str, status: StatusCode) -> Error {
    let status_text = status.to_string();
    match status {
        StatusCode::NOT_FOUND => Error::UserNotFound {
            username: username.to_string(),
            status: status_text,
        },
        StatusCode::UNAUTHORIZED => Error::InvalidCredential { status: status_text },
        StatusCode::FORBIDDEN => Error::RateLimited { status: status_text },
        _ => Error::GitHubApi { status: status_text },
    }
}
