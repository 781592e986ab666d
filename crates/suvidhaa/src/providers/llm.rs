//! LLM provider trait for free-form text completion

use async_trait::async_trait;

use crate::error::Result;

/// One chat-style completion: a system directive plus a user prompt
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for text completion services
///
/// Implementations:
/// - `ChatCompletionsClient`: OpenAI-compatible `/chat/completions` endpoint
///
/// The provider returns raw model text and makes no structural promise about
/// it; callers own all interpretation.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Issue a single completion request
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
