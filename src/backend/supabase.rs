// src/backend/supabase.rs

//! PostgREST-backed implementation of [`DataBackend`].
//!
//! Every table maps to `{base}/rest/v1/{table}`; filters, ordering and the
//! pagination window are rendered onto PostgREST query operators
//! (`col=eq.v`, `col=ilike.*t*`, `col=in.(a,b)`, `order=`, `limit`/`offset`).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use super::{BackendError, DataBackend, Filter, SelectQuery};
use crate::config::AppConfig;

pub struct SupabaseBackend {
  http: reqwest::Client,
  rest_url: String,
}

impl SupabaseBackend {
  pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
    let mut headers = HeaderMap::new();
    // The service-role key doubles as both the project apikey and the bearer
    // token; the client is server-only.
    let key = HeaderValue::from_str(&config.supabase_service_role_key)
      .map_err(|e| BackendError::InvalidConfig(format!("service-role key is not a valid header value: {}", e)))?;
    headers.insert("apikey", key);
    let bearer = HeaderValue::from_str(&format!("Bearer {}", config.supabase_service_role_key))
      .map_err(|e| BackendError::InvalidConfig(format!("service-role key is not a valid header value: {}", e)))?;
    headers.insert(AUTHORIZATION, bearer);

    let http = reqwest::Client::builder().default_headers(headers).build()?;

    Ok(Self {
      http,
      rest_url: format!("{}/rest/v1", config.supabase_url.trim_end_matches('/')),
    })
  }

  fn table_url(&self, table: &str) -> String {
    format!("{}/{}", self.rest_url, table)
  }

  async fn parse_rows(response: reqwest::Response) -> Result<Vec<Value>, BackendError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    if body.is_empty() {
      return Ok(Vec::new());
    }
    let rows: Vec<Value> = serde_json::from_str(&body)?;
    Ok(rows)
  }
}

#[async_trait]
impl DataBackend for SupabaseBackend {
  async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Value>, BackendError> {
    let response = self
      .http
      .get(self.table_url(table))
      .query(&select_pairs(&query))
      .send()
      .await?;
    Self::parse_rows(response).await
  }

  async fn insert(&self, table: &str, rows: &[Value], on_conflict: Option<&str>) -> Result<Vec<Value>, BackendError> {
    let mut request = self
      .http
      .post(self.table_url(table))
      .header("Prefer", insert_prefer(on_conflict))
      .json(rows);
    if let Some(column) = on_conflict {
      request = request.query(&[("on_conflict", column)]);
    }
    Self::parse_rows(request.send().await?).await
  }

  async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> Result<Vec<Value>, BackendError> {
    let response = self
      .http
      .patch(self.table_url(table))
      .query(&filter_pairs(filters))
      .header("Prefer", "return=representation")
      .json(&patch)
      .send()
      .await?;
    Self::parse_rows(response).await
  }

  async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError> {
    let response = self
      .http
      .delete(self.table_url(table))
      .query(&filter_pairs(filters))
      .send()
      .await?;
    check_status(response).await?;
    Ok(())
  }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }
  let body = response.text().await.unwrap_or_default();
  Err(BackendError::Api {
    status: status.as_u16(),
    message: api_message(status.as_u16(), &body),
  })
}

/// PostgREST error bodies are JSON with a `message` field; surface that field
/// raw when present, the whole body otherwise.
fn api_message(status: u16, body: &str) -> String {
  if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
    if let Some(Value::String(message)) = map.get("message") {
      return message.clone();
    }
  }
  if body.is_empty() {
    format!("backend returned status {}", status)
  } else {
    body.to_string()
  }
}

fn insert_prefer(on_conflict: Option<&str>) -> &'static str {
  match on_conflict {
    Some(_) => "return=representation,resolution=ignore-duplicates",
    None => "return=representation",
  }
}

/// Render a scalar JSON value as a PostgREST filter literal.
fn literal(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn filter_pairs(filters: &[Filter]) -> Vec<(String, String)> {
  filters
    .iter()
    .map(|filter| match filter {
      Filter::Eq(column, value) => (column.clone(), format!("eq.{}", literal(value))),
      Filter::Ilike(column, pattern) => (column.clone(), format!("ilike.{}", pattern)),
      Filter::In(column, values) => {
        let list = values.iter().map(literal).collect::<Vec<_>>().join(",");
        (column.clone(), format!("in.({})", list))
      }
    })
    .collect()
}

fn select_pairs(query: &SelectQuery) -> Vec<(String, String)> {
  let mut pairs = Vec::new();
  if let Some(columns) = &query.columns {
    pairs.push(("select".to_string(), columns.clone()));
  }
  pairs.extend(filter_pairs(&query.filters));
  if let Some((column, ascending)) = &query.order {
    let direction = if *ascending { "asc" } else { "desc" };
    pairs.push(("order".to_string(), format!("{}.{}", column, direction)));
  }
  if let Some(limit) = query.limit {
    pairs.push(("limit".to_string(), limit.to_string()));
  }
  if let Some(offset) = query.offset {
    pairs.push(("offset".to_string(), offset.to_string()));
  }
  pairs
}
