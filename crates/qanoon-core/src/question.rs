//! Inbound question: the raw wire payload and its validated form.

use crate::error::RequestError;
use crate::language::Language;
use crate::topic::Topic;
use crate::validator::validate;
use serde::Deserialize;

/// Request body as sent by the client. Every field is optional here so a missing field
/// is reported as a 400 rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl QuestionRequest {
    /// Language for user-facing error copy: the requested one if it parses, else Urdu.
    pub fn language_hint(&self) -> Language {
        self.language
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or_default()
    }

    /// Validates in the order clients see errors: missing fields, question text, topic, language.
    pub fn into_question(self) -> Result<Question, RequestError> {
        let (Some(text), Some(topic), Some(language)) = (
            non_empty(self.question),
            non_empty(self.topic),
            non_empty(self.language),
        ) else {
            return Err(RequestError::MissingFields);
        };

        validate(&text)?;
        let topic = topic
            .parse::<Topic>()
            .map_err(|e| RequestError::InvalidTopic(e.0))?;
        let language = language
            .parse::<Language>()
            .map_err(|e| RequestError::InvalidLanguage(e.0))?;

        Ok(Question {
            text: text.trim().to_string(),
            topic,
            language,
        })
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// A question that passed validation. The text is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    topic: Topic,
    language: Language,
}

impl Question {
    pub fn new(text: &str, topic: Topic, language: Language) -> Result<Self, RequestError> {
        validate(text)?;
        Ok(Self {
            text: text.trim().to_string(),
            topic,
            language,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// First 50 chars, for logs.
    pub fn preview(&self) -> &str {
        crate::provider::truncate_chars(&self.text, 50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn request(q: Option<&str>, t: Option<&str>, l: Option<&str>) -> QuestionRequest {
        QuestionRequest {
            question: q.map(String::from),
            topic: t.map(String::from),
            language: l.map(String::from),
        }
    }

    #[test]
    fn valid_request_is_trimmed() {
        let q = request(Some("  What is minimum wage?  "), Some("salary-issues"), Some("english"))
            .into_question()
            .unwrap();
        assert_eq!(q.text(), "What is minimum wage?");
        assert_eq!(q.topic(), Topic::SalaryIssues);
        assert_eq!(q.language(), Language::English);
    }

    #[test]
    fn missing_or_empty_field_is_missing() {
        for r in [
            request(None, Some("loans"), Some("urdu")),
            request(Some("question?"), None, Some("urdu")),
            request(Some("question?"), Some("loans"), Some("")),
        ] {
            assert_eq!(r.into_question(), Err(RequestError::MissingFields));
        }
    }

    #[test]
    fn whitespace_question_is_validation_error() {
        let r = request(Some("   "), Some("loans"), Some("urdu"));
        assert_eq!(
            r.into_question(),
            Err(RequestError::Validation(ValidationError::EmptyQuestion))
        );
    }

    #[test]
    fn question_checked_before_topic_and_topic_before_language() {
        let r = request(Some("ab"), Some("bogus"), Some("klingon"));
        assert_eq!(
            r.into_question(),
            Err(RequestError::Validation(ValidationError::TooShort { min: 3 }))
        );
        let r = request(Some("abc"), Some("bogus"), Some("klingon"));
        assert_eq!(
            r.into_question(),
            Err(RequestError::InvalidTopic("bogus".into()))
        );
        let r = request(Some("abc"), Some("loans"), Some("klingon"));
        assert_eq!(
            r.into_question(),
            Err(RequestError::InvalidLanguage("klingon".into()))
        );
    }

    #[test]
    fn language_hint_falls_back_to_urdu() {
        assert_eq!(request(None, None, Some("english")).language_hint(), Language::English);
        assert_eq!(request(None, None, Some("klingon")).language_hint(), Language::Urdu);
        assert_eq!(request(None, None, None).language_hint(), Language::Urdu);
    }

    #[test]
    fn preview_is_capped() {
        let q = Question::new(&"z".repeat(80), Topic::Loans, Language::English).unwrap();
        assert_eq!(q.preview().chars().count(), 50);
    }
}
