//! Document analysis against the completion service

use std::sync::Arc;

use crate::config::{AnalysisConfig, LlmConfig};
use crate::providers::{CompletionRequest, LlmProvider};

use super::parser::{parse_model_output, AnalysisOutcome};
use super::prompt::{build_prompt, truncate_chars, SYSTEM_DIRECTIVE};

/// Turns extracted document text into the structured field set
pub struct DocumentAnalyzer {
    llm: Arc<dyn LlmProvider>,
    max_input_chars: usize,
    temperature: f32,
    max_tokens: u32,
}

impl DocumentAnalyzer {
    /// Create an analyzer using the given completion provider
    pub fn new(llm: Arc<dyn LlmProvider>, analysis: &AnalysisConfig, llm_config: &LlmConfig) -> Self {
        Self {
            llm,
            max_input_chars: analysis.max_input_chars,
            temperature: llm_config.temperature,
            max_tokens: llm_config.max_tokens,
        }
    }

    /// Analyze a document. Never fails: a failed completion call yields
    /// [`AnalysisOutcome::Unavailable`].
    ///
    /// Only the first `max_input_chars` characters of `content` are sent.
    pub async fn analyze(&self, title: &str, content: &str) -> AnalysisOutcome {
        let excerpt = truncate_chars(content, self.max_input_chars);
        let request = CompletionRequest {
            system: SYSTEM_DIRECTIVE.to_string(),
            prompt: build_prompt(title, excerpt),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            "Analyzing '{}' with {}/{} ({} of {} chars)",
            title,
            self.llm.name(),
            self.llm.model(),
            excerpt.chars().count(),
            content.chars().count()
        );

        let outcome = match self.llm.complete(&request).await {
            Ok(raw) => parse_model_output(&raw),
            Err(e) => {
                tracing::error!("AI processing error: {}", e);
                AnalysisOutcome::Unavailable
            }
        };

        if let AnalysisOutcome::PartiallyStructured { defaulted, .. } = &outcome {
            let keys: Vec<_> = defaulted.iter().map(|f| f.json_key()).collect();
            tracing::warn!("Model output for '{}' missing fields: {}", title, keys.join(", "));
        }
        tracing::info!("Analysis of '{}' finished: {}", title, outcome.kind());

        outcome
    }
}
