use chrono::Utc;
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::survey::codec::SerializationError;

pub mod reviews;
pub mod stores;
pub mod surveys;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("database error: {0}")]
  Db(#[from] rusqlite::Error),
  #[error("{0} not found")]
  NotFound(&'static str),
  #[error(transparent)]
  Encode(#[from] SerializationError),
  #[error("survey is not accepting responses")]
  NotAnswerable,
}

pub fn open(path: &Path) -> Result<Connection, StoreError> {
  let conn = Connection::open(path)?;
  init_schema(&conn)?;
  Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, StoreError> {
  let conn = Connection::open_in_memory()?;
  init_schema(&conn)?;
  Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
  conn.execute_batch(
    "CREATE TABLE IF NOT EXISTS stores (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        settings TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
      );
      CREATE TABLE IF NOT EXISTS reviews (
        id TEXT PRIMARY KEY,
        store_id TEXT NOT NULL,
        rating INTEGER NOT NULL,
        author TEXT NOT NULL,
        date TEXT NOT NULL,
        text TEXT NOT NULL,
        language TEXT NOT NULL DEFAULT 'ja',
        translated_text TEXT,
        reply_text TEXT,
        replied INTEGER NOT NULL DEFAULT 0,
        replied_at TEXT,
        flag_status TEXT NOT NULL DEFAULT 'none',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY(store_id) REFERENCES stores(id)
      );
      CREATE INDEX IF NOT EXISTS idx_reviews_store ON reviews(store_id);
      CREATE TABLE IF NOT EXISTS surveys (
        id TEXT PRIMARY KEY,
        store_id TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        questions TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'draft',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY(store_id) REFERENCES stores(id)
      );
      CREATE INDEX IF NOT EXISTS idx_surveys_store ON surveys(store_id);
      CREATE TABLE IF NOT EXISTS survey_responses (
        id TEXT PRIMARY KEY,
        survey_id TEXT NOT NULL,
        answers TEXT NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY(survey_id) REFERENCES surveys(id)
      );
      CREATE INDEX IF NOT EXISTS idx_responses_survey ON survey_responses(survey_id);"
  )?;
  Ok(())
}

pub(crate) fn now_string() -> String {
  Utc::now().to_rfc3339()
}
