use serde_json::{json, Value};

use super::client::{AiError, TextGenerator};
use super::prompts::{translate_survey_prompt, Language};
use crate::survey::types::Question;

#[derive(Debug, Clone)]
pub struct TranslatedSurvey {
    pub title: String,
    pub questions: Vec<Question>,
}

// Hands the decoded question list to the generator and maps the translated
// values back onto the caller's records. Ids, types, and required flags never
// come from the model; only title, labels, and options do.
pub fn translate_survey(
    gen: &dyn TextGenerator,
    title: &str,
    questions: &[Question],
    target: Language,
) -> Result<TranslatedSurvey, AiError> {
    let payload = serde_json::to_string(&json!({"title": title, "questions": questions}))
        .map_err(|e| AiError::Malformed(e.to_string()))?;
    let raw = gen.generate(&translate_survey_prompt(&payload, target))?;

    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| AiError::Malformed(format!("translation is not valid JSON: {e}")))?;
    let items = value
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| AiError::Malformed("translation carries no question list".to_string()))?;
    if items.len() != questions.len() {
        return Err(AiError::Malformed(format!(
            "translation changed the question count: expected {}, got {}",
            questions.len(),
            items.len()
        )));
    }

    let translated_title = value
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(title)
        .to_string();
    let translated_questions = questions
        .iter()
        .zip(items)
        .map(|(original, item)| merge_translation(original, item))
        .collect();

    Ok(TranslatedSurvey {
        title: translated_title,
        questions: translated_questions,
    })
}

fn merge_translation(original: &Question, item: &Value) -> Question {
    let label = item
        .get("label")
        .and_then(Value::as_str)
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(&original.label)
        .to_string();
    let options = match item.get("options").and_then(Value::as_array) {
        Some(values) if values.len() == original.options.len() => values
            .iter()
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect(),
        _ => original.options.clone(),
    };

    Question {
        id: original.id.clone(),
        label,
        kind: original.kind,
        options,
        required: original.required,
    }
}

#[cfg(test)]
mod tests {
    use super::{translate_survey, TranslatedSurvey};
    use crate::ai::client::{AiError, TextGenerator};
    use crate::ai::prompts::Language;
    use crate::survey::types::{Question, QuestionType};

    struct CannedGenerator(String);

    impl TextGenerator for CannedGenerator {
        fn generate(&self, _prompt: &str) -> Result<String, AiError> {
            Ok(self.0.clone())
        }
    }

    fn questions() -> Vec<Question> {
        vec![Question {
            id: "q1".to_string(),
            label: "ご満足いただけましたか".to_string(),
            kind: QuestionType::Single,
            options: vec![
                "はい".to_string(),
                "いいえ".to_string(),
                String::new(),
                String::new(),
            ],
            required: true,
        }]
    }

    #[test]
    fn maps_translated_values_onto_original_records() {
        let gen = CannedGenerator(
            r#"{"title":"Visit survey","questions":[{"id":"whatever","label":"Were you satisfied?","type":"text","options":["Yes","No","",""],"required":false}]}"#
                .to_string(),
        );
        let TranslatedSurvey { title, questions: translated } =
            translate_survey(&gen, "来店アンケート", &questions(), Language::English)
                .expect("translate");

        assert_eq!(title, "Visit survey");
        assert_eq!(translated[0].label, "Were you satisfied?");
        assert_eq!(translated[0].options[0], "Yes");
        // Structure stays the caller's, whatever the model claims.
        assert_eq!(translated[0].id, "q1");
        assert_eq!(translated[0].kind, QuestionType::Single);
        assert!(translated[0].required);
    }

    #[test]
    fn keeps_original_values_when_translation_omits_them() {
        let gen = CannedGenerator(
            r#"{"title":"","questions":[{"label":"","options":["only","two"]}]}"#.to_string(),
        );
        let result = translate_survey(&gen, "来店アンケート", &questions(), Language::English)
            .expect("translate");

        assert_eq!(result.title, "来店アンケート");
        assert_eq!(result.questions[0].label, "ご満足いただけましたか");
        assert_eq!(result.questions[0].options, questions()[0].options);
    }

    #[test]
    fn garbage_output_is_malformed() {
        let gen = CannedGenerator("sorry, I cannot do that".to_string());
        assert!(matches!(
            translate_survey(&gen, "t", &questions(), Language::Korean),
            Err(AiError::Malformed(_))
        ));
    }

    #[test]
    fn changed_question_count_is_malformed() {
        let gen = CannedGenerator(r#"{"title":"T","questions":[]}"#.to_string());
        assert!(matches!(
            translate_survey(&gen, "t", &questions(), Language::Korean),
            Err(AiError::Malformed(_))
        ));
    }
}
