//! Answer pipeline: prompt build, ordered provider fallback, normalization, advice screen
//! and disclaimer. Provider failures are recovered here and never reach the caller raw.

use crate::config::QanoonConfig;
use crate::error::ProviderError;
use crate::language::Language;
use crate::prompts::{PromptBuilder, PromptPair};
use crate::provider::{normalize_answer, HuggingFaceProvider, OpenAiProvider, Provider, Source};
use crate::question::Question;
use crate::screen::{contains_advice_language, AdvicePolicy};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// `error` detail returned when every provider failed. Provider-specific causes are logged only.
pub const ALL_PROVIDERS_FAILED: &str = "All providers failed";

/// Position of a provider in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSlot {
    Primary,
    Secondary,
}

impl ProviderSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderSlot::Primary => "primary",
            ProviderSlot::Secondary => "secondary",
        }
    }
}

/// Outcome of trying one provider (including its retries).
#[derive(Debug, Clone)]
pub struct ProviderResult {
    pub success: bool,
    pub text: String,
    pub slot: ProviderSlot,
    pub source: Source,
    pub error_detail: Option<String>,
}

impl ProviderResult {
    fn ok(slot: ProviderSlot, source: Source, text: String) -> Self {
        Self {
            success: true,
            text,
            slot,
            source,
            error_detail: None,
        }
    }

    fn failed(slot: ProviderSlot, source: Source, err: &ProviderError) -> Self {
        Self {
            success: false,
            text: String::new(),
            slot,
            source,
            error_detail: Some(err.to_string()),
        }
    }
}

/// Response returned to the caller for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResponse {
    pub success: bool,
    pub answer: String,
    pub source: Source,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnswerResponse {
    pub fn failure(language: Language, answer: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            answer: answer.to_string(),
            source: Source::Error,
            language,
            error: Some(error.into()),
        }
    }
}

/// Tunables for the pipeline, normally taken from [`QanoonConfig`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_response_length: usize,
    pub max_new_tokens: u32,
    pub timeout: Duration,
    pub max_retries: u32,
    pub advice_policy: AdvicePolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&QanoonConfig::default())
    }
}

impl From<&QanoonConfig> for PipelineOptions {
    fn from(c: &QanoonConfig) -> Self {
        Self {
            max_response_length: c.max_response_length,
            max_new_tokens: c.max_new_tokens,
            timeout: c.provider_timeout,
            max_retries: c.provider_max_retries,
            advice_policy: c.advice_policy,
        }
    }
}

pub struct AnswerPipeline {
    primary: Arc<dyn Provider>,
    secondary: Arc<dyn Provider>,
    prompts: PromptBuilder,
    options: PipelineOptions,
}

impl AnswerPipeline {
    pub fn new(
        primary: Arc<dyn Provider>,
        secondary: Arc<dyn Provider>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            primary,
            secondary,
            prompts: PromptBuilder::new(options.max_response_length),
            options,
        }
    }

    /// Hugging Face first, OpenAI second.
    pub fn from_config(config: &QanoonConfig) -> Self {
        Self::new(
            Arc::new(HuggingFaceProvider::from_config(config)),
            Arc::new(OpenAiProvider::from_config(config)),
            PipelineOptions::from(config),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.primary.is_configured() || self.secondary.is_configured()
    }

    /// Names of providers that hold a credential, in fallback order.
    pub fn configured_providers(&self) -> Vec<&'static str> {
        [&self.primary, &self.secondary]
            .into_iter()
            .filter(|p| p.is_configured())
            .map(|p| p.name())
            .collect()
    }

    /// Answer a validated question. Never fails: provider errors become a localized
    /// failure response with `source: error`.
    pub async fn generate_answer(&self, question: &Question) -> AnswerResponse {
        let language = question.language();

        if !self.is_configured() {
            tracing::error!("[PIPELINE] No provider credentials configured");
            return AnswerResponse::failure(
                language,
                language.not_configured_message(),
                "No AI provider is configured",
            );
        }

        tracing::info!(
            topic = %question.topic(),
            language = %language,
            "[PIPELINE] Answering: {}...",
            question.preview()
        );

        let prompts = self
            .prompts
            .build_prompts(question.topic(), language, question.text());

        for (slot, provider) in [
            (ProviderSlot::Primary, &self.primary),
            (ProviderSlot::Secondary, &self.secondary),
        ] {
            if !provider.is_configured() {
                continue;
            }
            let result = self.attempt(slot, &**provider, &prompts).await;
            if result.success {
                tracing::info!(
                    provider = provider.name(),
                    slot = slot.as_str(),
                    chars = result.text.chars().count(),
                    "[PIPELINE] Answer generated"
                );
                return AnswerResponse {
                    success: true,
                    answer: format!("{}\n\n{}", result.text, language.disclaimer()),
                    source: result.source,
                    language,
                    error: None,
                };
            }
            tracing::warn!(
                provider = provider.name(),
                slot = slot.as_str(),
                error = result.error_detail.as_deref().unwrap_or("unknown"),
                "[PIPELINE] Provider failed"
            );
        }

        // Provider detail is logged above, never returned.
        AnswerResponse::failure(
            language,
            language.generic_failure_message(),
            ALL_PROVIDERS_FAILED,
        )
    }

    /// One provider, up to `1 + max_retries` calls.
    async fn attempt(
        &self,
        slot: ProviderSlot,
        provider: &dyn Provider,
        prompts: &PromptPair,
    ) -> ProviderResult {
        let attempts = 1 + self.options.max_retries;
        let mut last_err = ProviderError::NotConfigured;
        for n in 1..=attempts {
            match self.call_once(provider, prompts).await {
                Ok(text) => return ProviderResult::ok(slot, provider.source(), text),
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        attempt = n,
                        of = attempts,
                        error = %e,
                        "[PIPELINE] Provider attempt failed"
                    );
                    let retryable = e.is_retryable();
                    last_err = e;
                    if !retryable {
                        break;
                    }
                }
            }
        }
        ProviderResult::failed(slot, provider.source(), &last_err)
    }

    async fn call_once(
        &self,
        provider: &dyn Provider,
        prompts: &PromptPair,
    ) -> Result<String, ProviderError> {
        if !provider.is_configured() {
            return Err(ProviderError::NotConfigured);
        }
        let raw = tokio::time::timeout(
            self.options.timeout,
            provider.complete(prompts, self.options.max_new_tokens),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.options.timeout))??;

        let text = normalize_answer(&raw, self.options.max_response_length);
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        if contains_advice_language(&text) {
            match self.options.advice_policy {
                AdvicePolicy::Log => tracing::warn!(
                    provider = provider.name(),
                    "[SCREEN] Answer contains advice language"
                ),
                AdvicePolicy::Reject => return Err(ProviderError::AdviceLanguage),
            }
        }
        Ok(text)
    }
}
