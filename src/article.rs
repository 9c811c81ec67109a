use log::warn;

use crate::llm::{self, ModelParams, is_anthropic_model};
use crate::{GenerationRequest, fallback};

/// Which path produced the article
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    External(String),
    Fallback(String),
}

impl GenerationOutcome {
    pub fn text(&self) -> &str {
        match self {
            GenerationOutcome::External(text) | GenerationOutcome::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            GenerationOutcome::External(text) | GenerationOutcome::Fallback(text) => text,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            GenerationOutcome::External(_) => "external",
            GenerationOutcome::Fallback(_) => "fallback",
        }
    }
}

/// Credentials and model knobs, resolved once at startup and injected here
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Overrides the provider's API host; None means the real endpoint
    pub api_base: Option<String>,
}

impl GeneratorConfig {
    /// The credential matching the configured model's provider, if any
    fn credential(&self) -> Option<&str> {
        if is_anthropic_model(&self.model) {
            self.anthropic_api_key.as_deref()
        } else {
            self.openai_api_key.as_deref()
        }
    }
}

/// Chooses between external-model generation and the rule-based synthesizer
pub struct ArticleGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl ArticleGenerator {
    pub fn new(client: reqwest::Client, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Produce an article for the request.
    ///
    /// With a credential configured the external model is tried first; any
    /// failure is logged and the rule-based synthesizer takes over. Without a
    /// credential the synthesizer runs unconditionally. Never errors.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        if let Some(api_key) = self.config.credential() {
            let params = ModelParams {
                model: self.config.model.clone(),
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                api_base: self.config.api_base.clone(),
            };
            match llm::generate_article(&self.client, &params, api_key, request).await {
                Ok(text) if !text.trim().is_empty() => return GenerationOutcome::External(text),
                Ok(_) => warn!("external model returned an empty article, using fallback"),
                Err(e) => warn!("external generation failed, using fallback: {e}"),
            }
        }
        GenerationOutcome::Fallback(fallback::synthesize(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArticleLength, Segment};

    fn request() -> GenerationRequest {
        let segments = vec![
            Segment {
                text: "A talk about reliable systems".to_string(),
                start: 0.0,
                duration: 2.0,
            },
            Segment {
                text: "and how to build them".to_string(),
                start: 2.0,
                duration: 2.0,
            },
        ];
        let normalized = crate::transcript::normalize(&segments);
        GenerationRequest {
            transcript: normalized.text,
            segments,
            style_preset: String::new(),
            style_detail: String::new(),
            length: ArticleLength::Medium,
            language: String::new(),
            truncated: false,
        }
    }

    #[tokio::test]
    async fn test_no_credential_uses_fallback() {
        let generator = ArticleGenerator::new(
            reqwest::Client::new(),
            GeneratorConfig {
                model: "gpt-4o".to_string(),
                max_tokens: 1024,
                temperature: 0.7,
                ..Default::default()
            },
        );
        let outcome = generator.generate(&request()).await;
        assert_eq!(outcome.mode(), "fallback");
        assert!(outcome.text().contains("## Overview"));
    }

    #[tokio::test]
    async fn test_external_failure_uses_fallback() {
        // Credential present but the endpoint is unroutable, so the external
        // call errors and the synthesizer silently takes over
        let generator = ArticleGenerator::new(
            reqwest::Client::new(),
            GeneratorConfig {
                openai_api_key: Some("sk-test".to_string()),
                model: "gpt-4o".to_string(),
                max_tokens: 256,
                temperature: 0.7,
                api_base: Some("http://127.0.0.1:1".to_string()),
                ..Default::default()
            },
        );
        let outcome = generator.generate(&request()).await;
        assert_eq!(outcome.mode(), "fallback");
        assert!(outcome.text().contains("## Key Points"));
    }

    #[tokio::test]
    async fn test_anthropic_failure_uses_fallback() {
        let generator = ArticleGenerator::new(
            reqwest::Client::new(),
            GeneratorConfig {
                anthropic_api_key: Some("sk-ant-test".to_string()),
                model: "claude-sonnet-4-6".to_string(),
                max_tokens: 256,
                temperature: 0.7,
                api_base: Some("http://127.0.0.1:1".to_string()),
                ..Default::default()
            },
        );
        let outcome = generator.generate(&request()).await;
        assert_eq!(outcome.mode(), "fallback");
    }

    #[tokio::test]
    async fn test_wrong_provider_credential_uses_fallback() {
        // An OpenAI key does not enable an Anthropic model
        let generator = ArticleGenerator::new(
            reqwest::Client::new(),
            GeneratorConfig {
                openai_api_key: Some("sk-test".to_string()),
                model: "claude-sonnet-4-6".to_string(),
                max_tokens: 1024,
                temperature: 0.7,
                ..Default::default()
            },
        );
        let outcome = generator.generate(&request()).await;
        assert_eq!(outcome.mode(), "fallback");
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = GenerationOutcome::External("body".to_string());
        assert_eq!(outcome.mode(), "external");
        assert_eq!(outcome.text(), "body");
        assert_eq!(outcome.into_text(), "body");

        let outcome = GenerationOutcome::Fallback("other".to_string());
        assert_eq!(outcome.mode(), "fallback");
    }
}
