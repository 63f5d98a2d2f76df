use serde_json::Value;

use super::types::Question;

pub fn missing_required(questions: &[Question], answers: &Value) -> Vec<String> {
    questions
        .iter()
        .filter(|q| q.required && !has_answer(answers.get(&q.id)))
        .map(|q| q.label.clone())
        .collect()
}

fn has_answer(answer: Option<&Value>) -> bool {
    match answer {
        Some(Value::String(text)) => !text.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::missing_required;
    use crate::survey::types::{Question, QuestionType};
    use serde_json::json;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                id: "q1".to_string(),
                label: "Overall impression".to_string(),
                kind: QuestionType::Single,
                options: vec!["Good".to_string(), "Bad".to_string()],
                required: true,
            },
            Question {
                id: "q2".to_string(),
                label: "What did you like?".to_string(),
                kind: QuestionType::Multi,
                options: vec!["Food".to_string(), "Service".to_string()],
                required: true,
            },
            Question {
                id: "q3".to_string(),
                label: "Free comments".to_string(),
                kind: QuestionType::Text,
                options: Vec::new(),
                required: false,
            },
        ]
    }

    #[test]
    fn complete_answers_pass() {
        let answers = json!({"q1": "Good", "q2": ["Food"], "q3": ""});
        assert!(missing_required(&questions(), &answers).is_empty());
    }

    #[test]
    fn absent_blank_and_empty_list_answers_are_flagged() {
        let answers = json!({"q1": "   ", "q2": []});
        let missing = missing_required(&questions(), &answers);
        assert_eq!(missing, vec!["Overall impression", "What did you like?"]);
    }

    #[test]
    fn optional_questions_are_never_flagged() {
        let answers = json!({"q1": "Good", "q2": ["Food", "Service"]});
        assert!(missing_required(&questions(), &answers).is_empty());
    }
}
