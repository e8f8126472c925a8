use std::sync::Arc;

use futures::future::join;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::llm::{Analyzer, PromptTemplate, PROFILE_TEMPLATE, REPO_TEMPLATE};
use crate::session::context::Session;
use crate::session::state::{SessionStatus, ViewState};

pub const PROFILE_ANALYSIS_TITLE: &str = "AI Profile Analysis";

/// What happened to the result of an analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The text (or failure message) now shown in the modal.
    Displayed(String),
    /// The modal was closed or a newer analysis was started before this one finished.
    Discarded,
    /// Nothing to analyze, the modal was not opened.
    Skipped,
}

/// Drives the login and analysis flows and owns the view state.
///
/// The state lock is never held across a network call. Login runs both GitHub
/// fetches concurrently, waits for both, and succeeds only if both do; when both
/// fail the user fetch's error is reported. Starting a login closes the modal. Every analysis gets a ticket
/// when it opens the modal; only the ticket that still owns the modal may publish
/// its result, so closing the modal or starting another analysis drops older
/// results when they arrive. In-flight requests are never cancelled.
pub struct SessionController {
    github: Arc<dyn GitHubApi>,
    analyzer: Analyzer,
    state: Mutex<ViewState>,
}

impl SessionController {
    pub fn new(github: Arc<dyn GitHubApi>, analyzer: Analyzer) -> Self {
        Self {
            github,
            analyzer,
            state: Mutex::new(ViewState::default()),
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    pub async fn login(&self, username: &str, credential: Option<&str>) -> Result<()> {
        let username = username.trim();
        let credential = credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        {
            let mut state = self.state.lock().await;
            if state.is_authenticating() {
                return Err(Error::LoginInProgress);
            }
            state.credential = credential.clone();

            if username.is_empty() {
                let err = Error::InvalidInput("username is required".to_string());
                state.login_error = Some(err.to_string());
                return Err(err);
            }

            state.status = SessionStatus::Authenticating;
            state.login_error = None;
            // invalidates tickets issued under the previous session
            state.close_modal();
        }

        tracing::info!("Connecting to GitHub as {}", username);
        let token = credential.as_deref();
        let (user, repositories) = join(
            self.github.fetch_user(username, token),
            self.github.fetch_repositories(username, token),
        )
        .await;
        // user fetch error takes precedence over the repository fetch error
        let fetched = user.and_then(|user| repositories.map(|repos| (user, repos)));

        let mut state = self.state.lock().await;
        match fetched {
            Ok((user, repositories)) => {
                tracing::info!(
                    "Logged in as {} with {} repositories",
                    user.login,
                    repositories.len()
                );
                state.status = SessionStatus::Authenticated(Session::new(user, repositories));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Login for {} failed: {}", username, e);
                state.status = SessionStatus::Unauthenticated;
                state.login_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetches the current user again with the credential kept from the last login.
    pub async fn refresh(&self) -> Result<()> {
        let (login, credential) = {
            let state = self.state.lock().await;
            let session = state.session().ok_or(Error::NotAuthenticated)?;
            (session.user().login.clone(), state.credential.clone())
        };
        self.login(&login, credential.as_deref()).await
    }

    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        if state.is_authenticating() {
            tracing::debug!("Ignoring logout while a login is pending");
            return;
        }
        if let Some(session) = state.session() {
            tracing::info!("Logged out {}", session.user().login);
        }
        state.status = SessionStatus::Unauthenticated;
        state.close_modal();
    }

    pub async fn analyze_profile(&self) -> Result<AnalysisOutcome> {
        let (ticket, context_json) = {
            let mut state = self.state.lock().await;
            let session = state.session().ok_or(Error::NotAuthenticated)?;
            if session.repositories().is_empty() {
                tracing::info!("No repositories to analyze for {}", session.user().login);
                return Ok(AnalysisOutcome::Skipped);
            }
            let context_json = session.profile_context().to_json()?;
            let ticket = state.open_modal(PROFILE_ANALYSIS_TITLE.to_string());
            (ticket, context_json)
        };

        let result = self.analyzer.analyze_profile(&context_json).await;
        Ok(self.publish(ticket, &PROFILE_TEMPLATE, result).await)
    }

    pub async fn analyze_repo(&self, name: &str) -> Result<AnalysisOutcome> {
        let (ticket, context_json) = {
            let mut state = self.state.lock().await;
            let session = state.session().ok_or(Error::NotAuthenticated)?;
            let context = session.repo_context(name)?;
            let context_json = context.to_json()?;
            let ticket = state.open_modal(format!("Repository Analysis: {}", context.name));
            (ticket, context_json)
        };

        let result = self.analyzer.analyze_repo(&context_json).await;
        Ok(self.publish(ticket, &REPO_TEMPLATE, result).await)
    }

    /// Closes the modal and drops its result. A pending request keeps running.
    pub async fn close_modal(&self) {
        self.state.lock().await.close_modal();
    }

    async fn publish(
        &self,
        ticket: u64,
        template: &PromptTemplate,
        result: Result<String>,
    ) -> AnalysisOutcome {
        let text = match result {
            Ok(text) => text,
            Err(_) => template.failure_message.to_string(),
        };

        let mut state = self.state.lock().await;
        if state.finish_analysis(ticket, text.clone()) {
            AnalysisOutcome::Displayed(text)
        } else {
            tracing::debug!("Discarding {} analysis result for ticket {}", template.name, ticket);
            AnalysisOutcome::Discarded
        }
    }
}
