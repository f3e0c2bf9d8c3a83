//! Text-generation providers. Each backend implements [`Provider`]; the pipeline owns
//! the fallback order and retry policy, so providers make exactly one call per `complete`.

mod huggingface;
mod openai;

pub use huggingface::{extract_answer, HuggingFaceProvider};
pub use openai::{normalize_answer, OpenAiProvider};

use crate::error::ProviderError;
use crate::prompts::PromptPair;
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) const TEMPERATURE: f32 = 0.7;
pub(crate) const TOP_P: f32 = 0.95;
/// Upstream error bodies are cut to this many chars before they are logged.
const ERROR_BODY_PREVIEW: usize = 300;

/// Where an answer came from, as reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    HuggingFace,
    OpenAi,
    Error,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::HuggingFace => "huggingface",
            Source::OpenAi => "openai",
            Source::Error => "error",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text-generation backend: prompts in, answer text out.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Wire source reported when this provider answers.
    fn source(&self) -> Source;

    /// Whether a credential is present. Unconfigured providers are never called.
    fn is_configured(&self) -> bool;

    /// Generate an answer. The returned text is already cleaned and length-capped;
    /// an empty answer is reported as [`ProviderError::EmptyResponse`].
    async fn complete(&self, prompts: &PromptPair, max_tokens: u32) -> Result<String, ProviderError>;
}

/// Longest prefix of `s` that has at most `max_chars` chars.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Shared response handling: non-2xx becomes [`ProviderError::Status`], otherwise the body text.
pub(crate) async fn read_body(res: reqwest::Response) -> Result<String, ProviderError> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        return Err(ProviderError::Status {
            code: status.as_u16(),
            body: truncate_chars(&text, ERROR_BODY_PREVIEW).to_string(),
        });
    }
    Ok(text)
}

/// Client with the transport deadline applied. If the builder fails the default client
/// is used and only the pipeline's per-call timeout still bounds the request.
pub(crate) fn build_client(timeout: std::time::Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(
                ?timeout,
                "[PROVIDER] HTTP client build failed, falling back to defaults: {}",
                e
            );
            reqwest::Client::new()
        }
    }
}
