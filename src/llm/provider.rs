use async_trait::async_trait;
use crate::error::Result;

/// One single-shot completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// `None` leaves the sampling temperature at the provider's default.
    pub temperature: Option<f32>,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the generated text, or `None` if the provider answered without any.
    async fn generate(&self, request: GenerationRequest) -> Result<Option<String>>;
    fn name(&self) -> &str;
}
