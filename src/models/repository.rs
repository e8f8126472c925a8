use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository entry from `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub html_url: String,
    pub description: Option<String>,
    pub fork: bool,
    pub homepage: Option<String>,
    pub size: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<License>,
    pub stargazers_count: u32,
    pub watchers_count: u32,
    pub forks_count: u32,
    pub open_issues_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Null for repositories that never received a push.
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub key: String,
    pub name: String,
}

impl Repository {
    pub fn visibility(&self) -> &'static str {
        if self.private {
            "Private"
        } else {
            "Public"
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_github_payload() {
        let payload = r#"[{
            "id": 1296269,
            "node_id": "MDEwOlJlcG9zaXRvcnkxMjk2MjY5",
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "private": false,
            "html_url": "https://github.com/octocat/Hello-World",
            "description": "This your first repo!",
            "fork": false,
            "homepage": null,
            "size": 108,
            "language": null,
            "stargazers_count": 80,
            "watchers_count": 80,
            "forks_count": 9,
            "open_issues_count": 0,
            "license": {"key": "mit", "name": "MIT License", "spdx_id": "MIT"},
            "created_at": "2011-01-26T19:01:12Z",
            "updated_at": "2011-01-26T19:14:43Z",
            "pushed_at": null
        }]"#;

        let repos: Vec<Repository> = serde_json::from_str(payload).unwrap();
        assert_eq!(repos.len(), 1);
        let repo = &repos[0];
        assert_eq!(repo.name, "Hello-World");
        assert!(repo.topics.is_empty());
        assert_eq!(repo.pushed_at, None);
        assert_eq!(repo.license.as_ref().map(|l| l.key.as_str()), Some("mit"));
        assert_eq!(repo.visibility(), "Public");
    }
}
