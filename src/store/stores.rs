use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use super::{now_string, StoreError};
use crate::settings::DashboardSettings;
use crate::survey::codec::SerializationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
  pub id: String,
  pub name: String,
  pub settings: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

fn store_from_row(row: &Row) -> rusqlite::Result<Store> {
  Ok(Store {
    id: row.get(0)?,
    name: row.get(1)?,
    settings: row.get(2)?,
    created_at: row.get(3)?,
    updated_at: row.get(4)?
  })
}

pub fn create_store(conn: &Connection, name: &str) -> Result<Store, StoreError> {
  let store = Store {
    id: Uuid::new_v4().to_string(),
    name: name.to_string(),
    settings: None,
    created_at: now_string(),
    updated_at: now_string()
  };
  conn.execute(
    "INSERT INTO stores (id, name, settings, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    params![store.id, store.name, store.settings, store.created_at, store.updated_at]
  )?;
  Ok(store)
}

pub fn get_store(conn: &Connection, store_id: &str) -> Result<Store, StoreError> {
  conn
    .query_row(
      "SELECT id, name, settings, created_at, updated_at FROM stores WHERE id = ?1",
      params![store_id],
      store_from_row
    )
    .optional()?
    .ok_or(StoreError::NotFound("store"))
}

pub fn first_store(conn: &Connection) -> Result<Option<Store>, StoreError> {
  Ok(
    conn
      .query_row(
        "SELECT id, name, settings, created_at, updated_at FROM stores ORDER BY created_at LIMIT 1",
        [],
        store_from_row
      )
      .optional()?
  )
}

pub fn rename_store(conn: &Connection, store_id: &str, name: &str) -> Result<(), StoreError> {
  let changed = conn.execute(
    "UPDATE stores SET name = ?1, updated_at = ?2 WHERE id = ?3",
    params![name, now_string(), store_id]
  )?;
  if changed == 0 {
    return Err(StoreError::NotFound("store"));
  }
  Ok(())
}

// The settings column is a free-form JSON object; the dashboard toggles live
// under its "dashboardSettings" key. Corrupt or missing JSON degrades to
// defaults, same posture as the question codec.
pub fn load_dashboard_settings(
  conn: &Connection,
  store_id: &str
) -> Result<DashboardSettings, StoreError> {
  let store = get_store(conn, store_id)?;
  let root = settings_object(store.settings.as_deref());
  let settings = root
    .get("dashboardSettings")
    .cloned()
    .map(|v| {
      serde_json::from_value(v).unwrap_or_else(|e| {
        warn!("invalid dashboard settings for store {store_id}: {e}");
        DashboardSettings::default()
      })
    })
    .unwrap_or_default();
  Ok(settings)
}

pub fn update_settings(
  conn: &Connection,
  store_id: &str,
  patch: &Value
) -> Result<(), StoreError> {
  let store = get_store(conn, store_id)?;
  let mut root = settings_object(store.settings.as_deref());
  if let Value::Object(updates) = patch {
    for (key, value) in updates {
      root.insert(key.clone(), value.clone());
    }
  }
  let payload = serde_json::to_string(&Value::Object(root)).map_err(SerializationError::from)?;
  conn.execute(
    "UPDATE stores SET settings = ?1, updated_at = ?2 WHERE id = ?3",
    params![payload, now_string(), store_id]
  )?;
  Ok(())
}

fn settings_object(raw: Option<&str>) -> Map<String, Value> {
  let Some(raw) = raw else {
    return Map::new();
  };
  match serde_json::from_str::<Value>(raw) {
    Ok(Value::Object(map)) => map,
    Ok(_) => {
      warn!("stored settings are not a JSON object");
      Map::new()
    }
    Err(e) => {
      warn!("unable to parse stored settings: {e}");
      Map::new()
    }
  }
}
