// src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Backend Error: {0}")]
  Backend(#[from] BackendError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in handlers that use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<BackendError>() {
      return AppError::Backend(err.downcast::<BackendError>().unwrap());
    }
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({ "error": m })),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({ "error": m })),
      AppError::Config(m) => HttpResponse::InternalServerError().json(json!({ "error": m })),
      // Backend failures carry the raw underlying message, unclassified.
      AppError::Backend(e) => HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })),
      AppError::Internal(m) => HttpResponse::InternalServerError().json(json!({ "error": m })),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
