//! Advice-language screen: flags generated answers that read as prescriptive legal advice.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Markers of advice-giving phrasing, English and Urdu. Matched as lowercase substrings.
const ADVICE_PHRASES: &[&str] = &[
    "you should",
    "you must",
    "i recommend",
    "i advise",
    "you need to",
    "the best option",
    "i suggest",
    "آپ کو چاہیے",
    "آپ لازمی",
    "میں سفارش",
    "میں مشورہ",
];

/// True when the text contains any advice marker (case-insensitive).
pub fn contains_advice_language(text: &str) -> bool {
    let lower = text.to_lowercase();
    ADVICE_PHRASES.iter().any(|p| lower.contains(p))
}

/// What the pipeline does with an answer that trips the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvicePolicy {
    /// Log a warning and return the answer anyway.
    #[default]
    Log,
    /// Treat the answer as a failed attempt and move on.
    Reject,
}

impl FromStr for AdvicePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(AdvicePolicy::Log),
            "reject" => Ok(AdvicePolicy::Reject),
            other => Err(format!("unknown advice policy: {other}")),
        }
    }
}
