//! Answer languages and the fixed, per-language copy shown to users.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the user asked to be answered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    /// Urdu in Nastaliq script. The app's primary language, so also the fallback
    /// for messages when the requested language is unusable.
    #[default]
    Urdu,
    RomanUrdu,
    English,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Urdu, Language::RomanUrdu, Language::English];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Urdu => "urdu",
            Language::RomanUrdu => "roman-urdu",
            Language::English => "english",
        }
    }

    pub(crate) fn pick(
        self,
        urdu: &'static str,
        roman_urdu: &'static str,
        english: &'static str,
    ) -> &'static str {
        match self {
            Language::Urdu => urdu,
            Language::RomanUrdu => roman_urdu,
            Language::English => english,
        }
    }

    /// Non-advice notice appended to every successful answer.
    pub fn disclaimer(self) -> &'static str {
        self.pick(
            "⚠️ اہم نوٹ: یہ معلومات صرف تعلیمی مقاصد کے لیے ہے۔ یہ قانونی مشورہ نہیں ہے۔ کسی بھی قانونی معاملے میں براہ کرم کسی قابل اعتماد وکیل سے رابطہ کریں۔",
            "⚠️ Aham Note: Yeh malumat sirf taleemi maqsad ke liye hai. Yeh qanuni mashwara nahi hai. Kisi bhi qanuni mamla mein brahe karam kisi qaabil itimad wakeel se rabta karen.",
            "⚠️ Important Notice: This information is for educational purposes only. This is not legal advice. Please consult with a qualified lawyer for any legal matter.",
        )
    }

    /// No provider credential is configured.
    pub fn not_configured_message(self) -> &'static str {
        self.pick(
            "یہ سروس ابھی دستیاب نہیں ہے۔ براہ کرم بعد میں دوبارہ کوشش کریں۔",
            "Yeh service abhi dastiyab nahi hai. Brahe karam baad mein dobara koshish karen.",
            "This service is not configured yet. Please try again later.",
        )
    }

    /// Every configured provider failed.
    pub fn generic_failure_message(self) -> &'static str {
        self.pick(
            "معافی چاہتے ہیں، کوئی تکنیکی خرابی ہوئی۔",
            "Maazrat chahte hain, koi takneeki kharabi hui.",
            "Sorry, a technical problem occurred while preparing the answer.",
        )
    }

    /// Something failed outside the provider chain.
    pub fn apology_message(self) -> &'static str {
        self.pick(
            "معافی چاہتے ہیں، کوئی خرابی ہوئی۔ براہ کرم دوبارہ کوشش کریں۔",
            "Maazrat chahte hain, koi kharabi hui. Brahe karam dobara koshish karen.",
            "Sorry, something went wrong. Please try again.",
        )
    }

    pub fn missing_fields_message(self) -> &'static str {
        self.pick(
            "براہ کرم تمام معلومات فراہم کریں۔",
            "Brahe karam tamam malumat faraham karen.",
            "Please provide all required information.",
        )
    }

    pub fn invalid_topic_message(self) -> &'static str {
        self.pick(
            "غلط موضوع منتخب کیا گیا۔",
            "Ghalat mauzu muntakhib kiya gaya.",
            "An invalid topic was selected.",
        )
    }

    pub fn invalid_language_message(self) -> &'static str {
        self.pick(
            "غلط زبان منتخب کی گئی۔",
            "Ghalat zaban muntakhib ki gayi.",
            "An invalid language was selected.",
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
