//! OpenAI chat completions (secondary provider).

use super::{build_client, read_body, truncate_chars, Provider, Source, TEMPERATURE};
use crate::config::QanoonConfig;
use crate::error::ProviderError;
use crate::prompts::PromptPair;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageResponse>,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

pub struct OpenAiProvider {
    api_key: Option<String>,
    model: String,
    api_base: String,
    max_chars: usize,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, model: &str, max_chars: usize, timeout: Duration) -> Self {
        Self {
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            model: model.to_string(),
            api_base: crate::config::DEFAULT_OPENAI_API_BASE.to_string(),
            max_chars,
            client: build_client(timeout),
        }
    }

    pub fn from_config(config: &QanoonConfig) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            &config.openai_model,
            config.max_response_length,
            config.provider_timeout,
        )
        .with_api_base(&config.openai_api_base)
    }

    /// Any OpenAI-compatible base URL (e.g. `https://openrouter.ai/api/v1`).
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn source(&self) -> Source {
        Source::OpenAi
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompts: &PromptPair, max_tokens: u32) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompts.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompts.user,
                },
            ],
            max_tokens,
            temperature: TEMPERATURE,
        };

        let res = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let text = read_body(res).await?;

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::MalformedBody(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        let answer = normalize_answer(&content, self.max_chars);
        if answer.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(answer)
    }
}

/// Trims the reply and caps it at `max_chars`.
pub fn normalize_answer(text: &str, max_chars: usize) -> String {
    truncate_chars(text.trim(), max_chars).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_caps() {
        assert_eq!(normalize_answer("  Gratuity is due.  \n", 500), "Gratuity is due.");
        let long = "y".repeat(800);
        assert_eq!(normalize_answer(&long, 500).chars().count(), 500);
        assert_eq!(normalize_answer(" \n ", 500), "");
    }

    #[test]
    fn request_serializes_roles_in_order() {
        let body = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: vec![
                ChatMessage { role: "system", content: "sys" },
                ChatMessage { role: "user", content: "usr" },
            ],
            max_tokens: 500,
            temperature: TEMPERATURE,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "usr");
        assert_eq!(v["max_tokens"], 500);
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let p = OpenAiProvider::new(None, "gpt-3.5-turbo", 500, Duration::from_secs(1));
        let prompts = PromptPair {
            system: "s".into(),
            user: "u".into(),
        };
        assert!(matches!(
            p.complete(&prompts, 10).await,
            Err(ProviderError::NotConfigured)
        ));
    }
}
