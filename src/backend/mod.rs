// src/backend/mod.rs

//! Client seam for the managed table store.
//!
//! The store is an external collaborator: it owns schema, persistence, and
//! query execution. This module only defines the operations the rest of the
//! crate needs (filtered selects, inserts with optional conflict-ignore,
//! filtered updates and deletes) plus the production PostgREST-backed
//! implementation. Components take `&dyn DataBackend` so tests can swap in
//! an in-memory fake.

pub mod supabase;

pub use supabase::SupabaseBackend;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
  #[error("{0}")]
  Transport(#[from] reqwest::Error),

  /// Non-2xx response from the backend API; message is the raw body.
  #[error("{message}")]
  Api { status: u16, message: String },

  #[error("failed to decode backend response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("invalid backend configuration: {0}")]
  InvalidConfig(String),
}

/// A single row filter, rendered onto the backend's filter operators.
#[derive(Debug, Clone)]
pub enum Filter {
  /// Exact match on a column.
  Eq(String, Value),
  /// Case-insensitive substring match; the pattern uses `*` wildcards.
  Ilike(String, String),
  /// Membership in a value set.
  In(String, Vec<Value>),
}

impl Filter {
  pub fn eq(column: &str, value: impl Into<Value>) -> Self {
    Filter::Eq(column.to_string(), value.into())
  }

  pub fn ilike(column: &str, pattern: impl Into<String>) -> Self {
    Filter::Ilike(column.to_string(), pattern.into())
  }

  pub fn is_in(column: &str, values: Vec<Value>) -> Self {
    Filter::In(column.to_string(), values)
  }
}

/// A read query: projection, filters, ordering and an offset/limit window.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
  pub columns: Option<String>,
  pub filters: Vec<Filter>,
  pub order: Option<(String, bool)>, // (column, ascending)
  pub limit: Option<u64>,
  pub offset: Option<u64>,
}

impl SelectQuery {
  pub fn new() -> Self {
    Self::default()
  }

  /// Restrict the projection; defaults to all columns.
  pub fn columns(mut self, columns: &str) -> Self {
    self.columns = Some(columns.to_string());
    self
  }

  pub fn filter(mut self, filter: Filter) -> Self {
    self.filters.push(filter);
    self
  }

  pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
    self.order = Some((column.to_string(), ascending));
    self
  }

  pub fn limit(mut self, limit: u64) -> Self {
    self.limit = Some(limit);
    self
  }

  pub fn offset(mut self, offset: u64) -> Self {
    self.offset = Some(offset);
    self
  }
}

/// Table-style CRUD against the managed data service.
///
/// All operations return raw JSON rows; callers deserialize into their model
/// structs. Errors are surfaced verbatim — no retry, no classification.
#[async_trait]
pub trait DataBackend: Send + Sync {
  /// Fetch rows matching the query.
  async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Value>, BackendError>;

  /// Insert rows and return their representation.
  ///
  /// With `on_conflict = Some(column)` the insert is
  /// insert-on-conflict-do-nothing keyed on that column: rows that collide
  /// with an existing row are silently skipped and omitted from the returned
  /// representation.
  async fn insert(&self, table: &str, rows: &[Value], on_conflict: Option<&str>) -> Result<Vec<Value>, BackendError>;

  /// Patch all rows matching the filters and return the updated rows.
  async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> Result<Vec<Value>, BackendError>;

  /// Delete all rows matching the filters. Deleting zero rows is not an
  /// error and is indistinguishable from success.
  async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError>;
}
