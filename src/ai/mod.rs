pub mod client;
pub mod prompts;
pub mod translate;

pub use client::{AiError, GeminiClient, TextGenerator};
pub use prompts::Language;
pub use translate::{translate_survey, TranslatedSurvey};
