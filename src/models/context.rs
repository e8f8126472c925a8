use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repository::Repository;
use super::user::GitHubUser;
use crate::error::Result;

/// A repository reduced to what the profile analysis and the "top repos" view need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRepository {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
}

impl From<&Repository> for TopRepository {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            stars: repo.stargazers_count,
        }
    }
}

/// One slice of the language chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysisContext {
    pub username: String,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub top_repos: Vec<TopRepository>,
}

impl ProfileAnalysisContext {
    pub fn new(user: &GitHubUser, top_repos: Vec<TopRepository>) -> Self {
        Self {
            username: user.login.clone(),
            bio: user.bio.clone(),
            public_repos: user.public_repos,
            followers: user.followers,
            top_repos,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoAnalysisContext {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub updated_at: DateTime<Utc>,
    pub topics: Vec<String>,
}

impl RepoAnalysisContext {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&Repository> for RepoAnalysisContext {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            updated_at: repo.updated_at,
            topics: repo.topics.clone(),
        }
    }
}
