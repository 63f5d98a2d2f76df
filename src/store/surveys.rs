use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;
use uuid::Uuid;

use super::{now_string, StoreError};
use crate::survey::codec::{self, decode_for_display, decode_for_edit, encode};
use crate::survey::types::{Question, Survey, SurveyResponse, SurveyStatus, SurveySummary};

fn survey_from_row(row: &Row) -> rusqlite::Result<Survey> {
  let status: String = row.get(5)?;
  Ok(Survey {
    id: row.get(0)?,
    store_id: row.get(1)?,
    title: row.get(2)?,
    description: row.get(3)?,
    questions: row.get(4)?,
    status: SurveyStatus::from_str_or_default(&status),
    created_at: row.get(6)?,
    updated_at: row.get(7)?
  })
}

pub fn create_survey(
  conn: &Connection,
  store_id: &str,
  title: &str,
  description: Option<&str>,
  questions: &[Question]
) -> Result<Survey, StoreError> {
  let survey = Survey {
    id: Uuid::new_v4().to_string(),
    store_id: store_id.to_string(),
    title: title.to_string(),
    description: description.map(|d| d.to_string()),
    questions: encode(questions)?,
    status: SurveyStatus::Draft,
    created_at: now_string(),
    updated_at: now_string()
  };

  conn.execute(
    "INSERT INTO surveys (id, store_id, title, description, questions, status, created_at, updated_at) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      survey.id,
      survey.store_id,
      survey.title,
      survey.description,
      survey.questions,
      survey.status.as_str(),
      survey.created_at,
      survey.updated_at
    ]
  )?;

  Ok(survey)
}

pub fn get_survey(conn: &Connection, survey_id: &str) -> Result<Survey, StoreError> {
  conn
    .query_row(
      "SELECT id, store_id, title, description, questions, status, created_at, updated_at \
      FROM surveys WHERE id = ?1",
      params![survey_id],
      survey_from_row
    )
    .optional()?
    .ok_or(StoreError::NotFound("survey"))
}

pub fn list_surveys(conn: &Connection) -> Result<Vec<SurveySummary>, StoreError> {
  let mut stmt = conn.prepare(
    "SELECT s.id, s.title, st.name, s.questions, s.status, s.updated_at, \
      (SELECT COUNT(*) FROM survey_responses r WHERE r.survey_id = s.id) \
    FROM surveys s JOIN stores st ON st.id = s.store_id \
    ORDER BY s.created_at DESC"
  )?;
  let rows = stmt.query_map([], |row| {
    let questions: String = row.get(3)?;
    let status: String = row.get(4)?;
    Ok(SurveySummary {
      id: row.get(0)?,
      name: row.get(1)?,
      target_store: row.get(2)?,
      question_count: decode_for_display(&questions).len(),
      status: SurveyStatus::from_str_or_default(&status),
      last_updated: row.get(5)?,
      response_count: row.get(6)?
    })
  })?;

  let mut summaries = Vec::new();
  for row in rows {
    summaries.push(row?);
  }
  Ok(summaries)
}

pub fn update_survey(
  conn: &Connection,
  survey_id: &str,
  title: &str,
  description: Option<&str>,
  questions: &[Question]
) -> Result<Survey, StoreError> {
  let encoded = encode(questions)?;
  let changed = conn.execute(
    "UPDATE surveys SET title = ?1, description = ?2, questions = ?3, updated_at = ?4 WHERE id = ?5",
    params![title, description, encoded, now_string(), survey_id]
  )?;
  if changed == 0 {
    return Err(StoreError::NotFound("survey"));
  }
  get_survey(conn, survey_id)
}

pub fn update_survey_status(
  conn: &Connection,
  survey_id: &str,
  status: SurveyStatus
) -> Result<(), StoreError> {
  let changed = conn.execute(
    "UPDATE surveys SET status = ?1, updated_at = ?2 WHERE id = ?3",
    params![status.as_str(), now_string(), survey_id]
  )?;
  if changed == 0 {
    return Err(StoreError::NotFound("survey"));
  }
  Ok(())
}

pub fn delete_survey(conn: &Connection, survey_id: &str) -> Result<(), StoreError> {
  conn.execute(
    "DELETE FROM survey_responses WHERE survey_id = ?1",
    params![survey_id]
  )?;
  conn.execute("DELETE FROM surveys WHERE id = ?1", params![survey_id])?;
  Ok(())
}

pub fn duplicate_survey(conn: &Connection, survey_id: &str) -> Result<Survey, StoreError> {
  let source = get_survey(conn, survey_id)?;
  // Fresh ids so the copy can be edited alongside the source in one session.
  let questions = decode_for_edit(&source.questions);
  create_survey(
    conn,
    &source.store_id,
    &format!("{}（コピー）", source.title),
    source.description.as_deref(),
    &questions
  )
}

pub fn record_response(
  conn: &Connection,
  survey_id: &str,
  answers: &Value
) -> Result<SurveyResponse, StoreError> {
  let survey = get_survey(conn, survey_id)?;
  if survey.status != SurveyStatus::Published {
    return Err(StoreError::NotAnswerable);
  }

  let response = SurveyResponse {
    id: Uuid::new_v4().to_string(),
    survey_id: survey_id.to_string(),
    answers: codec::encode_answers(answers)?,
    created_at: now_string()
  };
  conn.execute(
    "INSERT INTO survey_responses (id, survey_id, answers, created_at) VALUES (?1, ?2, ?3, ?4)",
    params![
      response.id,
      response.survey_id,
      response.answers,
      response.created_at
    ]
  )?;
  Ok(response)
}

pub fn count_responses(conn: &Connection, survey_id: &str) -> Result<i64, StoreError> {
  Ok(conn.query_row(
    "SELECT COUNT(*) FROM survey_responses WHERE survey_id = ?1",
    params![survey_id],
    |row| row.get(0)
  )?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::{open_in_memory, stores};
  use crate::survey::types::QuestionType;
  use serde_json::json;

  fn sample_questions() -> Vec<Question> {
    vec![
      Question {
        id: "q1".to_string(),
        label: "Overall impression".to_string(),
        kind: QuestionType::Single,
        options: vec![
          "Good".to_string(),
          "Bad".to_string(),
          String::new(),
          String::new()
        ],
        required: true
      },
      Question {
        id: "q2".to_string(),
        label: "Free comments".to_string(),
        kind: QuestionType::Text,
        options: Vec::new(),
        required: false
      },
    ]
  }

  fn setup() -> (rusqlite::Connection, String) {
    let conn = open_in_memory().expect("open db");
    let store = stores::create_store(&conn, "渋谷本店").expect("create store");
    (conn, store.id)
  }

  #[test]
  fn create_then_get_round_trips_questions() {
    let (conn, store_id) = setup();
    let created =
      create_survey(&conn, &store_id, "来店アンケート", Some("ご意見をお聞かせください"), &sample_questions())
        .expect("create survey");
    assert_eq!(created.status, SurveyStatus::Draft);

    let fetched = get_survey(&conn, &created.id).expect("get survey");
    assert_eq!(fetched.title, "来店アンケート");
    assert_eq!(decode_for_display(&fetched.questions), sample_questions());
  }

  #[test]
  fn missing_survey_is_not_found() {
    let (conn, _) = setup();
    assert!(matches!(
      get_survey(&conn, "nope"),
      Err(StoreError::NotFound("survey"))
    ));
  }

  #[test]
  fn summaries_decode_double_stringified_legacy_rows() {
    let (conn, store_id) = setup();
    let single = encode(&sample_questions()).expect("encode");
    let double = serde_json::to_string(&single).expect("wrap");
    conn
      .execute(
        "INSERT INTO surveys (id, store_id, title, questions, status, created_at, updated_at) \
        VALUES ('legacy', ?1, 'Legacy survey', ?2, 'published', '2024-01-01', '2024-01-01')",
        params![store_id, double]
      )
      .expect("insert legacy row");

    let summaries = list_surveys(&conn).expect("list surveys");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].question_count, 2);
    assert_eq!(summaries[0].target_store, "渋谷本店");
    assert_eq!(summaries[0].response_count, 0);
  }

  #[test]
  fn corrupt_questions_column_lists_as_zero_questions() {
    let (conn, store_id) = setup();
    conn
      .execute(
        "INSERT INTO surveys (id, store_id, title, questions, status, created_at, updated_at) \
        VALUES ('bad', ?1, 'Broken survey', 'not json at all', 'draft', '2024-01-01', '2024-01-01')",
        params![store_id]
      )
      .expect("insert corrupt row");

    let summaries = list_surveys(&conn).expect("list surveys");
    assert_eq!(summaries[0].question_count, 0);
  }

  #[test]
  fn duplicate_copies_questions_with_fresh_ids() {
    let (conn, store_id) = setup();
    let source = create_survey(&conn, &store_id, "来店アンケート", None, &sample_questions())
      .expect("create survey");
    update_survey_status(&conn, &source.id, SurveyStatus::Published).expect("publish");

    let copy = duplicate_survey(&conn, &source.id).expect("duplicate");
    assert_eq!(copy.title, "来店アンケート（コピー）");
    assert_eq!(copy.status, SurveyStatus::Draft);

    let copied = decode_for_display(&copy.questions);
    assert_eq!(copied.len(), 2);
    assert_eq!(copied[0].label, "Overall impression");
    assert_ne!(copied[0].id, "q1");
  }

  #[test]
  fn responses_require_a_published_survey() {
    let (conn, store_id) = setup();
    let survey = create_survey(&conn, &store_id, "来店アンケート", None, &sample_questions())
      .expect("create survey");
    let answers = json!({"q1": "Good", "q2": "Great service"});

    assert!(matches!(
      record_response(&conn, &survey.id, &answers),
      Err(StoreError::NotAnswerable)
    ));

    update_survey_status(&conn, &survey.id, SurveyStatus::Published).expect("publish");
    let response = record_response(&conn, &survey.id, &answers).expect("record response");
    assert_eq!(response.survey_id, survey.id);
    assert_eq!(count_responses(&conn, &survey.id).expect("count"), 1);

    update_survey_status(&conn, &survey.id, SurveyStatus::Stopped).expect("stop");
    assert!(matches!(
      record_response(&conn, &survey.id, &answers),
      Err(StoreError::NotAnswerable)
    ));
  }

  #[test]
  fn delete_removes_survey_and_responses() {
    let (conn, store_id) = setup();
    let survey = create_survey(&conn, &store_id, "来店アンケート", None, &sample_questions())
      .expect("create survey");
    update_survey_status(&conn, &survey.id, SurveyStatus::Published).expect("publish");
    record_response(&conn, &survey.id, &json!({"q1": "Good"})).expect("record");

    delete_survey(&conn, &survey.id).expect("delete");
    assert!(get_survey(&conn, &survey.id).is_err());
    assert_eq!(count_responses(&conn, &survey.id).expect("count"), 0);
  }

  #[test]
  fn update_rewrites_questions_and_touches_updated_at() {
    let (conn, store_id) = setup();
    let survey = create_survey(&conn, &store_id, "来店アンケート", None, &sample_questions())
      .expect("create survey");

    let mut questions = sample_questions();
    questions.truncate(1);
    questions[0].label = "改善点を教えてください".to_string();
    let updated = update_survey(&conn, &survey.id, "改善アンケート", None, &questions)
      .expect("update survey");

    assert_eq!(updated.title, "改善アンケート");
    let decoded = decode_for_display(&updated.questions);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].label, "改善点を教えてください");
  }
}
