use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GitHubUser, Repository};

/// Read-only access to the GitHub data a session is built from.
///
/// `credential` is a personal access token; `None` or an empty string sends the
/// request unauthenticated.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn fetch_user(&self, username: &str, credential: Option<&str>) -> Result<GitHubUser>;

    /// First page (up to 100) of the user's repositories, most recently updated first.
    async fn fetch_repositories(
        &self,
        username: &str,
        credential: Option<&str>,
    ) -> Result<Vec<Repository>>;
}
