//! Prompt construction for the legal information assistant.
//! Output depends only on the inputs and the word budget, so equal inputs give equal prompts.

use crate::language::Language;
use crate::topic::Topic;

/// System and user prompt for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    /// Single-string form for plain text-generation endpoints.
    pub fn as_completion_input(&self) -> String {
        format!("{}\n\nUser: {}\n\nAssistant:", self.system, self.user)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    word_budget: usize,
}

impl PromptBuilder {
    pub fn new(word_budget: usize) -> Self {
        Self { word_budget }
    }

    pub fn build_prompts(&self, topic: Topic, language: Language, question: &str) -> PromptPair {
        PromptPair {
            system: self.system_prompt(topic, language),
            user: user_prompt(topic, language, question),
        }
    }

    fn system_prompt(&self, topic: Topic, language: Language) -> String {
        format!(
            "You are a Pakistani legal information assistant providing factual information about {topic}.
Your role is to:
1. Provide FACTUAL information only (NOT legal advice)
2. Cite relevant Pakistani laws and regulations
3. Keep responses under {budget} words
4. Always include a disclaimer that this is not legal advice
5. Suggest consulting a qualified lawyer for specific cases

Legal Context:
{context}

IMPORTANT RULES:
- You MUST NOT give personalized legal advice
- You MUST NOT encourage specific legal actions
- You MUST clearly state you are providing information only
- You MUST mention consulting a lawyer for specific situations
- You MUST be neutral and factual

{instruction}",
            topic = topic,
            budget = self.word_budget,
            context = topic.legal_context(),
            instruction = response_instruction(language),
        )
    }
}

fn user_prompt(topic: Topic, language: Language, question: &str) -> String {
    format!(
        "Topic: {}\nQuestion: {}\n\n{}",
        topic,
        question.trim(),
        not_advice_reminder(language)
    )
}

fn response_instruction(language: Language) -> &'static str {
    language.pick(
        "Respond in Urdu only. Use proper Urdu script. Format your response clearly with line breaks.",
        "Respond in Roman Urdu (Urdu written in Latin script). Keep language simple and clear.",
        "Respond in English. Use clear, simple English appropriate for general audience.",
    )
}

fn not_advice_reminder(language: Language) -> &'static str {
    language.pick(
        "براہ مہربانی یاد رکھیں: یہ قانونی مشورہ نہیں ہے۔",
        "Brahe karam yaad rakhen: Yeh qanuni mashwara nahi hai.",
        "Remember: This is not legal advice.",
    )
}
