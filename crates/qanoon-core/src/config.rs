//! Runtime configuration loaded once from the environment (`.env` is loaded by the gateway).

use crate::screen::AdvicePolicy;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_HF_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_HF_API_BASE: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_MAX_RESPONSE_LENGTH: usize = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const MAX_RETRIES_CAP: u32 = 3;

/// Qanoon configuration.
///
/// | Env | Default | Description |
/// |-----|---------|-------------|
/// | HF_API_KEY / NEXT_PUBLIC_HF_API_KEY | unset | Hugging Face inference key (primary provider). |
/// | OPENAI_API_KEY | unset | OpenAI key (secondary provider). |
/// | HF_MODEL_ID | mistralai/Mistral-7B-Instruct-v0.1 | Primary model. |
/// | OPENAI_MODEL_ID | gpt-3.5-turbo | Secondary model. |
/// | HF_API_BASE / OPENAI_API_BASE | public endpoints | Endpoint overrides. |
/// | MAX_RESPONSE_LENGTH | 500 | Max answer characters; also the word budget in the prompt. |
/// | MAX_NEW_TOKENS | MAX_RESPONSE_LENGTH | Token budget sent to providers. |
/// | PROVIDER_TIMEOUT_SECS | 30 | Per-call timeout, 1..=300. |
/// | PROVIDER_MAX_RETRIES | 0 | Extra attempts per provider, capped at 3. |
/// | ADVICE_POLICY | log | "log" \| "reject". |
/// | QANOON_BIND_ADDR | 127.0.0.1:8000 | Gateway listen address. |
#[derive(Clone)]
pub struct QanoonConfig {
    pub hf_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub hf_model: String,
    pub openai_model: String,
    pub hf_api_base: String,
    pub openai_api_base: String,
    pub max_response_length: usize,
    pub max_new_tokens: u32,
    pub provider_timeout: Duration,
    pub provider_max_retries: u32,
    pub advice_policy: AdvicePolicy,
    pub bind_addr: String,
}

impl Default for QanoonConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl QanoonConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name -> value source. Blank values count as unset; unparseable
    /// numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let max_response_length = get("MAX_RESPONSE_LENGTH")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_RESPONSE_LENGTH);
        let max_new_tokens = get("MAX_NEW_TOKENS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(|| u32::try_from(max_response_length).unwrap_or(u32::MAX));
        let timeout_secs = get("PROVIDER_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, MAX_TIMEOUT_SECS);
        let retries = get("PROVIDER_MAX_RETRIES")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0)
            .min(MAX_RETRIES_CAP);
        let advice_policy = get("ADVICE_POLICY")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            hf_api_key: get("HF_API_KEY").or_else(|| get("NEXT_PUBLIC_HF_API_KEY")),
            openai_api_key: get("OPENAI_API_KEY"),
            hf_model: get("HF_MODEL_ID").unwrap_or_else(|| DEFAULT_HF_MODEL.to_string()),
            openai_model: get("OPENAI_MODEL_ID").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            hf_api_base: get("HF_API_BASE")
                .unwrap_or_else(|| DEFAULT_HF_API_BASE.to_string()),
            openai_api_base: get("OPENAI_API_BASE")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
            max_response_length,
            max_new_tokens,
            provider_timeout: Duration::from_secs(timeout_secs),
            provider_max_retries: retries,
            advice_policy,
            bind_addr: get("QANOON_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }

    /// True when at least one provider has a credential.
    pub fn any_provider_configured(&self) -> bool {
        self.hf_api_key.is_some() || self.openai_api_key.is_some()
    }
}

// Keys are redacted so the config can be logged at startup.
impl fmt::Debug for QanoonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |k: &Option<String>| if k.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("QanoonConfig")
            .field("hf_api_key", &redact(&self.hf_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("hf_model", &self.hf_model)
            .field("openai_model", &self.openai_model)
            .field("hf_api_base", &self.hf_api_base)
            .field("openai_api_base", &self.openai_api_base)
            .field("max_response_length", &self.max_response_length)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("provider_timeout", &self.provider_timeout)
            .field("provider_max_retries", &self.provider_max_retries)
            .field("advice_policy", &self.advice_policy)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> QanoonConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        QanoonConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let c = QanoonConfig::default();
        assert!(c.hf_api_key.is_none());
        assert!(c.openai_api_key.is_none());
        assert!(!c.any_provider_configured());
        assert_eq!(c.max_response_length, 500);
        assert_eq!(c.max_new_tokens, 500);
        assert_eq!(c.hf_model, DEFAULT_HF_MODEL);
        assert_eq!(c.openai_model, DEFAULT_OPENAI_MODEL);
        assert_eq!(c.provider_timeout, Duration::from_secs(30));
        assert_eq!(c.provider_max_retries, 0);
        assert_eq!(c.advice_policy, AdvicePolicy::Log);
        assert_eq!(c.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn blank_keys_are_unset() {
        let c = config(&[("HF_API_KEY", "   "), ("OPENAI_API_KEY", "")]);
        assert!(!c.any_provider_configured());
    }

    #[test]
    fn legacy_hf_key_name_is_honoured() {
        let c = config(&[("NEXT_PUBLIC_HF_API_KEY", " hf_abc ")]);
        assert_eq!(c.hf_api_key.as_deref(), Some("hf_abc"));
    }

    #[test]
    fn numbers_are_clamped_or_defaulted() {
        let c = config(&[
            ("MAX_RESPONSE_LENGTH", "120"),
            ("PROVIDER_TIMEOUT_SECS", "9999"),
            ("PROVIDER_MAX_RETRIES", "10"),
        ]);
        assert_eq!(c.max_response_length, 120);
        assert_eq!(c.max_new_tokens, 120);
        assert_eq!(c.provider_timeout, Duration::from_secs(MAX_TIMEOUT_SECS));
        assert_eq!(c.provider_max_retries, MAX_RETRIES_CAP);

        let c = config(&[("MAX_RESPONSE_LENGTH", "lots"), ("MAX_NEW_TOKENS", "64")]);
        assert_eq!(c.max_response_length, 500);
        assert_eq!(c.max_new_tokens, 64);
    }

    #[test]
    fn debug_redacts_keys() {
        let c = config(&[("OPENAI_API_KEY", "sk-secret")]);
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("<set>"));
    }
}
