//! Error types for the Qanoon answer path.

use crate::language::Language;
use std::time::Duration;
use thiserror::Error;

/// Question text rejected before any provider is called.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error("question is longer than {max} characters")]
    TooLong { max: usize },

    #[error("question is shorter than {min} characters")]
    TooShort { min: usize },
}

impl ValidationError {
    /// User-facing message in the requested language.
    pub fn localized(&self, language: Language) -> &'static str {
        match self {
            ValidationError::EmptyQuestion => language.pick(
                "سوال خالی ہے۔",
                "Sawal khali hai.",
                "The question is empty.",
            ),
            ValidationError::TooLong { .. } => language.pick(
                "سوال بہت لمبا ہے۔ براہ کرم مختصر سوال پوچھیں۔",
                "Sawal bohat lamba hai. Brahe karam mukhtasar sawal poochen.",
                "The question is too long. Please ask a shorter question.",
            ),
            ValidationError::TooShort { .. } => language.pick(
                "سوال بہت مختصر ہے۔ براہ کرم مزید تفصیل دیں۔",
                "Sawal bohat mukhtasar hai. Brahe karam mazeed tafseel den.",
                "The question is too short. Please add more detail.",
            ),
        }
    }
}

/// Client-caused failures on the inbound request. All map to HTTP 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RequestError {
    pub fn localized(&self, language: Language) -> &'static str {
        match self {
            RequestError::MissingFields => language.missing_fields_message(),
            RequestError::InvalidTopic(_) => language.invalid_topic_message(),
            RequestError::InvalidLanguage(_) => language.invalid_language_message(),
            RequestError::Validation(e) => e.localized(language),
        }
    }
}

/// Failure of a single provider attempt. Recovered inside the pipeline, never surfaced raw.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no API key configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedBody(String),

    #[error("empty answer")]
    EmptyResponse,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("answer contains advice language")]
    AdviceLanguage,
}

impl ProviderError {
    /// Whether another attempt against the same provider could succeed.
    /// Client errors (4xx) are final except 408 and 429.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::NotConfigured => false,
            ProviderError::Status { code, .. } => {
                !(400..500).contains(code) || *code == 408 || *code == 429
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_topic_message_names_topic() {
        let err = RequestError::InvalidTopic("not-a-real-topic".into());
        assert_eq!(err.to_string(), "Invalid topic: not-a-real-topic");
        assert_eq!(
            err.localized(Language::English),
            "An invalid topic was selected."
        );
    }

    #[test]
    fn validation_error_passes_through() {
        let err: RequestError = ValidationError::TooLong { max: 1000 }.into();
        assert_eq!(err.to_string(), "question is longer than 1000 characters");
        assert_eq!(
            err.localized(Language::Urdu),
            "سوال بہت لمبا ہے۔ براہ کرم مختصر سوال پوچھیں۔"
        );
    }

    #[test]
    fn not_configured_is_terminal() {
        assert!(!ProviderError::NotConfigured.is_retryable());
        assert!(ProviderError::EmptyResponse.is_retryable());
        assert!(ProviderError::Timeout(Duration::from_secs(1)).is_retryable());
    }

    #[test]
    fn client_errors_are_not_retried() {
        let status = |code| ProviderError::Status {
            code,
            body: String::new(),
        };
        for code in [400, 401, 403, 404, 422] {
            assert!(!status(code).is_retryable(), "{code}");
        }
        for code in [408, 429, 500, 502, 503] {
            assert!(status(code).is_retryable(), "{code}");
        }
    }
}
