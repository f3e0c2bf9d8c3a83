//! Hugging Face hosted inference (primary provider). Plain text generation: the prompt pair
//! is flattened into one `System / User / Assistant:` transcript and the model continues it.

use super::{build_client, read_body, truncate_chars, Provider, Source, TEMPERATURE, TOP_P};
use crate::config::QanoonConfig;
use crate::error::ProviderError;
use crate::prompts::PromptPair;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ASSISTANT_MARKER: &str = "Assistant:";

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct Generation {
    generated_text: Option<String>,
}

// The inference API answers with a list for text-generation models, a bare object for
// some task pipelines, and `{"error": ...}` while a model is loading.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<Generation>),
    Failed { error: String },
    Single(Generation),
}

pub struct HuggingFaceProvider {
    api_key: Option<String>,
    model: String,
    api_base: String,
    max_chars: usize,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    pub fn new(api_key: Option<String>, model: &str, max_chars: usize, timeout: Duration) -> Self {
        Self {
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            model: model.to_string(),
            api_base: crate::config::DEFAULT_HF_API_BASE.to_string(),
            max_chars,
            client: build_client(timeout),
        }
    }

    pub fn from_config(config: &QanoonConfig) -> Self {
        Self::new(
            config.hf_api_key.clone(),
            &config.hf_model,
            config.max_response_length,
            config.provider_timeout,
        )
        .with_api_base(&config.hf_api_base)
    }

    /// Point at a different inference host (self-hosted TGI, test server).
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.api_base, self.model)
    }
}

#[async_trait::async_trait]
impl Provider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn source(&self) -> Source {
        Source::HuggingFace
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompts: &PromptPair, max_tokens: u32) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;
        let inputs = prompts.as_completion_input();
        let body = GenerationRequest {
            inputs: &inputs,
            parameters: GenerationParameters {
                max_new_tokens: max_tokens,
                temperature: TEMPERATURE,
                top_p: TOP_P,
                do_sample: true,
            },
        };

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let text = read_body(res).await?;

        let raw = parse_generated_text(&text)?;
        let answer = extract_answer(&raw, self.max_chars);
        if answer.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(answer)
    }
}

fn parse_generated_text(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerationResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::MalformedBody(e.to_string()))?;
    let generation = match parsed {
        GenerationResponse::Batch(list) => list.into_iter().next(),
        GenerationResponse::Single(g) => Some(g),
        GenerationResponse::Failed { error } => {
            return Err(ProviderError::MalformedBody(format!("inference error: {error}")))
        }
    };
    generation
        .and_then(|g| g.generated_text)
        .ok_or_else(|| ProviderError::MalformedBody("no generated_text in response".to_string()))
}

/// Pulls the assistant's reply out of a raw transcript continuation.
///
/// Takes the text after the last `Assistant:` marker (or all of it when there is none),
/// keeps only the first paragraph, and caps it at `max_chars`.
pub fn extract_answer(raw: &str, max_chars: usize) -> String {
    let reply = match raw.rfind(ASSISTANT_MARKER) {
        Some(idx) => &raw[idx + ASSISTANT_MARKER.len()..],
        None => raw,
    };
    let first_paragraph = reply.trim().split("\n\n").next().unwrap_or_default().trim();
    truncate_chars(first_paragraph, max_chars).trim_end().to_string()
}
