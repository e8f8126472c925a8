use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("User '{username}' not found ({status})")]
    UserNotFound { username: String, status: String },

    #[error("Invalid or expired token ({status})")]
    InvalidCredential { status: String },

    #[error("Rate limit exceeded ({status}). Use a token to raise the limit.")]
    RateLimited { status: String },

    #[error("GitHub API error: {status}")]
    GitHubApi { status: String },

    #[error("Failed to fetch repositories ({status})")]
    RepositoryFetch { status: String },

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("A login is already in progress")]
    LoginInProgress,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for failures reported by GitHub itself, as opposed to transport or local errors.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Error::UserNotFound { .. }
                | Error::InvalidCredential { .. }
                | Error::RateLimited { .. }
                | Error::GitHubApi { .. }
                | Error::RepositoryFetch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_status_text() {
        let err = Error::UserNotFound {
            username: "ghost".to_string(),
            status: "404 Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "User 'ghost' not found (404 Not Found)");

        let err = Error::RepositoryFetch {
            status: "500 Internal Server Error".to_string(),
        };
        assert!(err.to_string().contains("500 Internal Server Error"));
    }

    #[test]
    fn test_provider_failure_classification() {
        assert!(Error::RateLimited { status: "403 Forbidden".into() }.is_provider_failure());
        assert!(!Error::NotAuthenticated.is_provider_failure());
        assert!(!Error::Analysis("timeout".into()).is_provider_failure());
    }
}
