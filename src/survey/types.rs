use serde::{Deserialize, Serialize};

pub const MAX_AUTHORED_QUESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Single,
    Multi,
    Text,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
            Self::Text => "text",
        }
    }

    pub fn from_str_or_default(value: &str) -> Self {
        match value {
            "multi" => Self::Multi,
            "text" => Self::Text,
            _ => Self::Single,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: Vec<String>,
    pub required: bool,
}

impl Question {
    pub fn visible_options(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| !o.is_empty())
            .map(String::as_str)
            .collect()
    }
}

pub fn default_options() -> Vec<String> {
    vec![String::new(), String::new(), String::new(), String::new()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    Draft,
    Published,
    Stopped,
}

impl SurveyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Stopped => "stopped",
        }
    }

    pub fn from_str_or_default(value: &str) -> Self {
        match value {
            "published" => Self::Published,
            "stopped" => Self::Stopped,
            _ => Self::Draft,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    pub store_id: String,
    pub title: String,
    pub description: Option<String>,
    pub questions: String,
    pub status: SurveyStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummary {
    pub id: String,
    pub name: String,
    pub target_store: String,
    pub question_count: usize,
    pub status: SurveyStatus,
    pub last_updated: String,
    pub response_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: String,
    pub survey_id: String,
    pub answers: String,
    pub created_at: String,
}
