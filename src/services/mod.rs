// src/services/mod.rs

//! Business workflows sitting between the HTTP handlers and the backend
//! client. Every function takes `&dyn DataBackend` so the whole layer can be
//! exercised against an in-memory fake.

pub mod cart;
pub mod checkout;
pub mod passwords;
pub mod seed;

use crate::errors::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Serialize an insert/patch payload for the backend.
pub(crate) fn payload<T: Serialize>(value: &T) -> Result<Value> {
  serde_json::to_value(value).map_err(|e| AppError::Internal(format!("failed to serialize backend payload: {}", e)))
}

/// Deserialize a raw backend row into a model struct.
pub(crate) fn row<T: DeserializeOwned>(value: Value) -> Result<T> {
  serde_json::from_value(value).map_err(|e| AppError::Internal(format!("unexpected row shape from backend: {}", e)))
}
