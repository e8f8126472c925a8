use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub account as returned by `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

impl GitHubUser {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }

    /// The blog field as a navigable URL. GitHub stores whatever the user typed,
    /// often without a scheme.
    pub fn blog_url(&self) -> Option<String> {
        let blog = self.blog.as_deref()?.trim();
        if blog.is_empty() {
            return None;
        }
        if blog.starts_with("http://") || blog.starts_with("https://") {
            Some(blog.to_string())
        } else {
            Some(format!("https://{}", blog))
        }
    }
}
