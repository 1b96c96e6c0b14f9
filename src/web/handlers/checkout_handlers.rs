// src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::checkout;
use crate::state::AppState;
use uuid::Uuid;

#[derive(Deserialize, Debug)]
pub struct CheckoutPayload {
  pub user_id: Option<Uuid>,
}

#[instrument(name = "handler::checkout", skip(app_state, payload))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CheckoutPayload>,
) -> Result<HttpResponse, AppError> {
  let user_id = payload
    .into_inner()
    .user_id
    .ok_or_else(|| AppError::Validation("user_id required".to_string()))?;

  let receipt = checkout::checkout(app_state.backend.as_ref(), user_id, app_state.config.tax_rate).await?;
  info!(order_id = %receipt.order_id, total = receipt.total, "Checkout completed for user.");

  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "order_id": receipt.order_id,
    "total": receipt.total,
  })))
}
