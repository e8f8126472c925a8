pub mod provider;
pub mod gemini;
pub mod prompts;
pub mod analyzer;

pub use provider::{GenerationRequest, LLMProvider};
pub use gemini::GeminiProvider;
pub use prompts::{PromptTemplate, PROFILE_TEMPLATE, REPO_TEMPLATE};
pub use analyzer::Analyzer;
