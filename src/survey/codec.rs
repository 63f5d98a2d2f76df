use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::types::{default_options, Question, QuestionType};

// Some write paths stringify the question list twice before persisting, so the
// stored text may be a JSON array or a JSON string wrapping that array. Decode
// unwraps at most this many string layers before giving up.
const MAX_UNWRAP_ATTEMPTS: usize = 2;

#[derive(Debug, Error)]
#[error("questions are not serializable: {0}")]
pub struct SerializationError(#[from] serde_json::Error);

pub fn encode(questions: &[Question]) -> Result<String, SerializationError> {
    Ok(serde_json::to_string(questions)?)
}

pub fn encode_answers(answers: &Value) -> Result<String, SerializationError> {
    Ok(serde_json::to_string(answers)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    Display,
    Edit,
}

pub fn decode_for_display(raw: &str) -> Vec<Question> {
    decode(raw, DecodeMode::Display)
}

pub fn decode_for_edit(raw: &str) -> Vec<Question> {
    decode(raw, DecodeMode::Edit)
}

pub fn decode(raw: &str, mode: DecodeMode) -> Vec<Question> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let mut value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("unable to parse stored questions: {e}");
            return Vec::new();
        }
    };

    let mut attempts = 0;
    while let Value::String(inner) = value {
        if attempts >= MAX_UNWRAP_ATTEMPTS {
            warn!("stored questions still string-wrapped after {MAX_UNWRAP_ATTEMPTS} unwrap attempts");
            return Vec::new();
        }
        attempts += 1;
        value = match serde_json::from_str(&inner) {
            Ok(v) => v,
            Err(e) => {
                warn!("unable to parse string-wrapped questions: {e}");
                return Vec::new();
            }
        };
    }

    match value {
        Value::Array(items) => {
            let stamp = Utc::now().timestamp_millis();
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let forced_id = match mode {
                        DecodeMode::Edit => Some(format!("q{stamp}_{index}")),
                        DecodeMode::Display => None,
                    };
                    question_from_value(item, forced_id)
                })
                .collect()
        }
        _ => {
            warn!("stored questions did not decode to a list");
            Vec::new()
        }
    }
}

fn question_from_value(item: &Value, forced_id: Option<String>) -> Question {
    let id = match forced_id {
        Some(id) => id,
        None => item
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    };
    let label = item
        .get("label")
        .and_then(Value::as_str)
        .or_else(|| item.get("text").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();
    let kind = item
        .get("type")
        .and_then(Value::as_str)
        .map(QuestionType::from_str_or_default)
        .unwrap_or(QuestionType::Single);
    let options = match item.get("options").and_then(Value::as_array) {
        Some(values) => values
            .iter()
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect(),
        None => default_options(),
    };
    let required = item
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Question {
        id,
        label,
        kind,
        options,
        required,
    }
}
