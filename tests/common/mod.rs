// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::Level;
use uuid::Uuid;

use spellcart::backend::{BackendError, DataBackend, Filter, SelectQuery};
use spellcart::config::AppConfig;
use spellcart::state::AppState;

pub fn setup_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init();
}

// --- In-memory fake of the managed table store ---
//
// Substitutes for the PostgREST backend in tests: tables are JSON row
// vectors, filters implement eq/ilike/in, inserts assign uuid ids, and
// `on_conflict` emulates insert-on-conflict-do-nothing.
#[derive(Default)]
pub struct MemoryBackend {
  tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  /// Raw table contents, for assertions.
  pub fn rows(&self, table: &str) -> Vec<Value> {
    self.tables.lock().unwrap().get(table).cloned().unwrap_or_default()
  }

  pub fn row_count(&self, table: &str) -> usize {
    self.rows(table).len()
  }
}

fn matches(row: &Value, filter: &Filter) -> bool {
  match filter {
    Filter::Eq(column, value) => row.get(column) == Some(value),
    Filter::Ilike(column, pattern) => {
      let needle = pattern.trim_matches('*').to_lowercase();
      row
        .get(column)
        .and_then(Value::as_str)
        .map(|s| s.to_lowercase().contains(&needle))
        .unwrap_or(false)
    }
    Filter::In(column, values) => row.get(column).map(|v| values.contains(v)).unwrap_or(false),
  }
}

fn matches_all(row: &Value, filters: &[Filter]) -> bool {
  filters.iter().all(|filter| matches(row, filter))
}

fn cmp_values(a: &Value, b: &Value) -> Ordering {
  match (a, b) {
    (Value::Number(x), Value::Number(y)) => x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal),
    (Value::String(x), Value::String(y)) => x.cmp(y),
    _ => Ordering::Equal,
  }
}

fn project(row: &Value, columns: Option<&str>) -> Value {
  let Some(columns) = columns else {
    return row.clone();
  };
  if columns.trim() == "*" {
    return row.clone();
  }
  let mut projected = serde_json::Map::new();
  for column in columns.split(',').map(str::trim) {
    if let Some(value) = row.get(column) {
      projected.insert(column.to_string(), value.clone());
    }
  }
  Value::Object(projected)
}

#[async_trait]
impl DataBackend for MemoryBackend {
  async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Value>, BackendError> {
    let tables = self.tables.lock().unwrap();
    let mut rows: Vec<Value> = tables
      .get(table)
      .map(|rows| rows.iter().filter(|row| matches_all(row, &query.filters)).cloned().collect())
      .unwrap_or_default();

    if let Some((column, ascending)) = &query.order {
      rows.sort_by(|a, b| {
        let ordering = cmp_values(a.get(column).unwrap_or(&Value::Null), b.get(column).unwrap_or(&Value::Null));
        if *ascending {
          ordering
        } else {
          ordering.reverse()
        }
      });
    }

    let offset = query.offset.unwrap_or(0) as usize;
    let rows: Vec<Value> = rows.into_iter().skip(offset).collect();
    let rows: Vec<Value> = match query.limit {
      Some(limit) => rows.into_iter().take(limit as usize).collect(),
      None => rows,
    };

    Ok(rows.iter().map(|row| project(row, query.columns.as_deref())).collect())
  }

  async fn insert(&self, table: &str, rows: &[Value], on_conflict: Option<&str>) -> Result<Vec<Value>, BackendError> {
    let mut tables = self.tables.lock().unwrap();
    let stored = tables.entry(table.to_string()).or_default();

    let mut inserted = Vec::new();
    for row in rows {
      if let Some(conflict_column) = on_conflict {
        let conflicting = row
          .get(conflict_column)
          .map(|value| stored.iter().any(|existing| existing.get(conflict_column) == Some(value)))
          .unwrap_or(false);
        if conflicting {
          continue;
        }
      }

      let mut row = row.clone();
      if row.get("id").is_none() {
        row
          .as_object_mut()
          .expect("insert payload must be a JSON object")
          .insert("id".to_string(), json!(Uuid::new_v4()));
      }
      stored.push(row.clone());
      inserted.push(row);
    }
    Ok(inserted)
  }

  async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> Result<Vec<Value>, BackendError> {
    let mut tables = self.tables.lock().unwrap();
    let Some(stored) = tables.get_mut(table) else {
      return Ok(Vec::new());
    };

    let patch = patch.as_object().expect("patch must be a JSON object").clone();
    let mut updated = Vec::new();
    for row in stored.iter_mut().filter(|row| matches_all(row, filters)) {
      let object = row.as_object_mut().expect("stored rows are JSON objects");
      for (key, value) in &patch {
        object.insert(key.clone(), value.clone());
      }
      updated.push(row.clone());
    }
    Ok(updated)
  }

  async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError> {
    let mut tables = self.tables.lock().unwrap();
    if let Some(stored) = tables.get_mut(table) {
      stored.retain(|row| !matches_all(row, filters));
    }
    Ok(())
  }
}

// --- Fault-injecting wrapper for compensation tests ---
pub struct FailingBackend {
  pub inner: MemoryBackend,
  pub fail_insert_table: Option<String>,
  pub fail_delete_table: Option<String>,
}

impl FailingBackend {
  pub fn new(inner: MemoryBackend) -> Self {
    Self {
      inner,
      fail_insert_table: None,
      fail_delete_table: None,
    }
  }

  fn injected(op: &str, table: &str) -> BackendError {
    BackendError::Api {
      status: 500,
      message: format!("injected {} failure on {}", op, table),
    }
  }
}

#[async_trait]
impl DataBackend for FailingBackend {
  async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Value>, BackendError> {
    self.inner.select(table, query).await
  }

  async fn insert(&self, table: &str, rows: &[Value], on_conflict: Option<&str>) -> Result<Vec<Value>, BackendError> {
    if self.fail_insert_table.as_deref() == Some(table) {
      return Err(Self::injected("insert", table));
    }
    self.inner.insert(table, rows, on_conflict).await
  }

  async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> Result<Vec<Value>, BackendError> {
    self.inner.update(table, filters, patch).await
  }

  async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError> {
    if self.fail_delete_table.as_deref() == Some(table) {
      return Err(Self::injected("delete", table));
    }
    self.inner.delete(table, filters).await
  }
}

// --- Fixtures ---

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 5000,
    supabase_url: "http://localhost:0".to_string(),
    supabase_service_role_key: "test-key".to_string(),
    tax_rate: 0.10,
    seed_on_start: false,
  }
}

pub fn test_state(backend: Arc<dyn DataBackend>) -> AppState {
  AppState {
    backend,
    config: Arc::new(test_config()),
  }
}

pub async fn insert_user(backend: &dyn DataBackend, email: &str, name: &str) -> Uuid {
  let rows = backend
    .insert("users", &[json!({ "email": email, "name": name })], None)
    .await
    .unwrap();
  serde_json::from_value(rows[0]["id"].clone()).unwrap()
}

pub async fn insert_product(backend: &dyn DataBackend, name: &str, price: f64, category: &str) -> Uuid {
  let row = json!({
    "name": name,
    "description": format!("{} (test fixture)", name),
    "price": price,
    "category": category,
  });
  let rows = backend.insert("products", &[row], None).await.unwrap();
  serde_json::from_value(rows[0]["id"].clone()).unwrap()
}
