//! Qanoon Guide core library.
//! Educational legal information for Pakistan: validates a question, builds the prompts,
//! asks Hugging Face then OpenAI, and returns a disclaimed answer in Urdu, Roman Urdu or English.

pub mod config;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod question;
pub mod screen;
pub mod topic;
pub mod validator;

pub use config::QanoonConfig;
pub use error::{ProviderError, RequestError, ValidationError};
pub use language::Language;
pub use pipeline::{
    AnswerPipeline, AnswerResponse, PipelineOptions, ProviderResult, ProviderSlot,
    ALL_PROVIDERS_FAILED,
};
pub use prompts::{PromptBuilder, PromptPair};
pub use provider::{HuggingFaceProvider, OpenAiProvider, Provider, Source};
pub use question::{Question, QuestionRequest};
pub use screen::{contains_advice_language, AdvicePolicy};
pub use topic::Topic;
pub use validator::validate;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
