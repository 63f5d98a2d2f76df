pub mod codec;
pub mod types;
pub mod validate;

pub use codec::{decode_for_display, decode_for_edit, encode, SerializationError};
pub use types::{Question, QuestionType, Survey, SurveyResponse, SurveyStatus, SurveySummary};
