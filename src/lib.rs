pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod llm;
pub mod stats;
pub mod session;
pub mod render;
pub mod console;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, GeminiConfig};
pub use error::{Error, Result};
pub use github::{GitHubApi, GitHubClient};
pub use llm::{Analyzer, GeminiProvider, LLMProvider};
pub use session::{AnalysisOutcome, Session, SessionController};
