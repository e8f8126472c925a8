use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{
    GitHubUser, LanguageCount, ProfileAnalysisContext, RepoAnalysisContext, Repository,
    TopRepository,
};
use crate::stats::{
    language_histogram, top_repositories_by_stars, CHART_LANGUAGE_LIMIT, PROFILE_TOP_REPOS,
};

/// The data of one successful login. Replaced wholesale on re-login, dropped on logout.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: GitHubUser,
    repositories: Vec<Repository>,
}

/// Everything the main view renders for a session.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    pub user: &'a GitHubUser,
    pub languages: Vec<LanguageCount>,
    pub top_repositories: Vec<TopRepository>,
    pub repositories: &'a [Repository],
}

impl Session {
    pub fn new(user: GitHubUser, repositories: Vec<Repository>) -> Self {
        Self { user, repositories }
    }

    pub fn user(&self) -> &GitHubUser {
        &self.user
    }

    /// Repositories in the order GitHub returned them.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn repository(&self, name: &str) -> Result<&Repository> {
        self.repositories
            .iter()
            .find(|r| r.name == name)
            .or_else(|| {
                self.repositories
                    .iter()
                    .find(|r| r.name.eq_ignore_ascii_case(name) || r.full_name == name)
            })
            .ok_or_else(|| Error::RepoNotFound(name.to_string()))
    }

    pub fn languages(&self) -> Vec<LanguageCount> {
        language_histogram(&self.repositories, CHART_LANGUAGE_LIMIT)
    }

    pub fn top_repositories(&self) -> Vec<TopRepository> {
        top_repositories_by_stars(&self.repositories, PROFILE_TOP_REPOS)
    }

    pub fn profile_context(&self) -> ProfileAnalysisContext {
        ProfileAnalysisContext::new(&self.user, self.top_repositories())
    }

    pub fn repo_context(&self, name: &str) -> Result<RepoAnalysisContext> {
        self.repository(name).map(RepoAnalysisContext::from)
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard {
            user: &self.user,
            languages: self.languages(),
            top_repositories: self.top_repositories(),
            repositories: &self.repositories,
        }
    }
}
