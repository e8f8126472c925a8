use std::sync::Arc;

use crate::error::{Error, Result};
use crate::llm::prompts::{PromptTemplate, PROFILE_TEMPLATE, REPO_TEMPLATE};
use crate::llm::provider::{GenerationRequest, LLMProvider};

/// Turns analysis contexts into free-text reviews through a text-generation provider.
///
/// Each call is a single round trip: no retries, no streaming.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn LLMProvider>,
    language: String,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn LLMProvider>, language: impl Into<String>) -> Self {
        Self {
            provider,
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub async fn analyze_profile(&self, context_json: &str) -> Result<String> {
        self.run(&PROFILE_TEMPLATE, context_json).await
    }

    pub async fn analyze_repo(&self, context_json: &str) -> Result<String> {
        self.run(&REPO_TEMPLATE, context_json).await
    }

    async fn run(&self, template: &PromptTemplate, context_json: &str) -> Result<String> {
        let request = GenerationRequest {
            prompt: template.render(context_json, &self.language),
            temperature: template.temperature,
        };

        tracing::info!(
            "Requesting {} analysis from {}",
            template.name,
            self.provider.name()
        );

        match self.provider.generate(request).await {
            Ok(Some(text)) => Ok(text),
            Ok(None) => {
                tracing::warn!("{} returned no text for {} analysis", self.provider.name(), template.name);
                Ok(template.empty_fallback.to_string())
            }
            Err(e) => {
                tracing::error!("{} analysis failed: {}", template.name, e);
                Err(Error::Analysis(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requests and replies with a canned answer.
    struct ScriptedProvider {
        reply: fn() -> Result<Option<String>>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedProvider {
        fn new(reply: fn() -> Result<Option<String>>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn generate(&self, request: GenerationRequest) -> Result<Option<String>> {
            self.seen.lock().unwrap().push(request);
            (self.reply)()
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_profile_uses_template_and_temperature() {
        let provider = ScriptedProvider::new(|| Ok(Some("A backend developer".to_string())));
        let analyzer = Analyzer::new(provider.clone(), "English");

        let text = analyzer.analyze_profile(r#"{"username":"mona"}"#).await.unwrap();
        assert_eq!(text, "A backend developer");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].temperature, Some(0.7));
        assert!(seen[0].prompt.contains(r#"Profile data: {"username":"mona"}"#));
        assert!(seen[0].prompt.contains("in English"));
    }

    #[tokio::test]
    async fn test_repo_uses_provider_default_temperature() {
        let provider = ScriptedProvider::new(|| Ok(Some("ok".to_string())));
        let analyzer = Analyzer::new(provider.clone(), "Portuguese");

        analyzer.analyze_repo(r#"{"name":"x"}"#).await.unwrap();

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].temperature, None);
        assert!(seen[0].prompt.contains("Answer in Portuguese"));
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let analyzer = Analyzer::new(ScriptedProvider::new(|| Ok(None)), "English");

        assert_eq!(
            analyzer.analyze_profile("{}").await.unwrap(),
            PROFILE_TEMPLATE.empty_fallback
        );
        assert_eq!(
            analyzer.analyze_repo("{}").await.unwrap(),
            REPO_TEMPLATE.empty_fallback
        );
    }

    #[tokio::test]
    async fn test_provider_failure_is_analysis_error() {
        let analyzer = Analyzer::new(
            ScriptedProvider::new(|| Err(Error::LLMApi("quota".to_string()))),
            "English",
        );

        let err = analyzer.analyze_repo("{}").await.unwrap_err();
        assert!(matches!(err, Error::Analysis(ref msg) if msg.contains("quota")));
    }
}
