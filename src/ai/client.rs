use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::util::text::strip_code_fences;

const DEFAULT_MODEL: &str = "gemini-flash-latest";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation request failed with status {0}")]
    Status(StatusCode),
    #[error("unusable generation response: {0}")]
    Malformed(String),
    #[error("unsupported translation language: {0}")]
    UnsupportedLanguage(String),
}

pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

pub struct GeminiClient {
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_env() -> Result<Self, AiError> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(Self::new)
            .ok_or(AiError::MissingApiKey)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let client = Client::builder().build()?;
        let url = format!(
            "{API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = json!({"contents": [{"parts": [{"text": prompt}]}]});

        let response = client.post(&url).json(&body).send()?;
        if !response.status().is_success() {
            return Err(AiError::Status(response.status()));
        }

        let payload: Value = response.json()?;
        let text = payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| AiError::Malformed("response carries no candidate text".to_string()))?;
        // Models wrap structured answers in markdown fences often enough that
        // every consumer needs them gone.
        Ok(strip_code_fences(text))
    }
}
