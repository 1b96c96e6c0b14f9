// src/web/handlers/dev_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::services::seed;
use crate::state::AppState;

/// Idempotent fixture loader for development environments.
#[instrument(name = "handler::dev_seed", skip(app_state))]
pub async fn seed_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  seed::run(app_state.backend.as_ref()).await?;
  Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
