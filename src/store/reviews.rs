use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{now_string, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagStatus {
  None,
  Pending,
  Resolved,
}

impl FlagStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Pending => "pending",
      Self::Resolved => "resolved",
    }
  }

  pub fn from_str_or_default(value: &str) -> Self {
    match value {
      "pending" => Self::Pending,
      "resolved" => Self::Resolved,
      _ => Self::None,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  pub id: String,
  pub store_id: String,
  pub rating: i64,
  pub author: String,
  pub date: String,
  pub text: String,
  pub language: String,
  pub translated_text: Option<String>,
  pub reply_text: Option<String>,
  pub replied: bool,
  pub replied_at: Option<String>,
  pub flag_status: FlagStatus,
  pub created_at: String,
  pub updated_at: String,
}

fn review_from_row(row: &Row) -> rusqlite::Result<Review> {
  let flag_status: String = row.get(11)?;
  Ok(Review {
    id: row.get(0)?,
    store_id: row.get(1)?,
    rating: row.get(2)?,
    author: row.get(3)?,
    date: row.get(4)?,
    text: row.get(5)?,
    language: row.get(6)?,
    translated_text: row.get(7)?,
    reply_text: row.get(8)?,
    replied: row.get(9)?,
    replied_at: row.get(10)?,
    flag_status: FlagStatus::from_str_or_default(&flag_status),
    created_at: row.get(12)?,
    updated_at: row.get(13)?
  })
}

const REVIEW_COLUMNS: &str = "id, store_id, rating, author, date, text, language, \
  translated_text, reply_text, replied, replied_at, flag_status, created_at, updated_at";

pub fn insert_review(
  conn: &Connection,
  store_id: &str,
  rating: i64,
  author: &str,
  date: &str,
  text: &str,
  language: Option<&str>
) -> Result<Review, StoreError> {
  let review = Review {
    id: Uuid::new_v4().to_string(),
    store_id: store_id.to_string(),
    rating,
    author: author.to_string(),
    date: date.to_string(),
    text: text.to_string(),
    language: language.unwrap_or("ja").to_string(),
    translated_text: None,
    reply_text: None,
    replied: false,
    replied_at: None,
    flag_status: FlagStatus::None,
    created_at: now_string(),
    updated_at: now_string()
  };

  conn.execute(
    "INSERT INTO reviews (id, store_id, rating, author, date, text, language, flag_status, created_at, updated_at) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    params![
      review.id,
      review.store_id,
      review.rating,
      review.author,
      review.date,
      review.text,
      review.language,
      review.flag_status.as_str(),
      review.created_at,
      review.updated_at
    ]
  )?;

  Ok(review)
}

pub fn get_review(conn: &Connection, review_id: &str) -> Result<Review, StoreError> {
  conn
    .query_row(
      &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"),
      params![review_id],
      review_from_row
    )
    .optional()?
    .ok_or(StoreError::NotFound("review"))
}

pub fn list_reviews(conn: &Connection, store_id: &str) -> Result<Vec<Review>, StoreError> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {REVIEW_COLUMNS} FROM reviews WHERE store_id = ?1 ORDER BY date DESC"
  ))?;
  let rows = stmt.query_map(params![store_id], review_from_row)?;

  let mut reviews = Vec::new();
  for row in rows {
    reviews.push(row?);
  }
  Ok(reviews)
}

pub fn save_reply(conn: &Connection, review_id: &str, reply_text: &str) -> Result<(), StoreError> {
  let changed = conn.execute(
    "UPDATE reviews SET reply_text = ?1, replied = 1, replied_at = ?2, updated_at = ?2 WHERE id = ?3",
    params![reply_text, now_string(), review_id]
  )?;
  if changed == 0 {
    return Err(StoreError::NotFound("review"));
  }
  Ok(())
}

pub fn set_flag_status(
  conn: &Connection,
  review_id: &str,
  status: FlagStatus
) -> Result<(), StoreError> {
  let changed = conn.execute(
    "UPDATE reviews SET flag_status = ?1, updated_at = ?2 WHERE id = ?3",
    params![status.as_str(), now_string(), review_id]
  )?;
  if changed == 0 {
    return Err(StoreError::NotFound("review"));
  }
  Ok(())
}

pub fn unreplied_count(conn: &Connection, store_id: &str) -> Result<i64, StoreError> {
  Ok(conn.query_row(
    "SELECT COUNT(*) FROM reviews WHERE store_id = ?1 AND replied = 0",
    params![store_id],
    |row| row.get(0)
  )?)
}
