// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::cart;
use crate::state::AppState;

// --- Request DTOs ---
// Required fields are `Option`s so a missing field yields a descriptive 400
// instead of a bare deserialization failure.

#[derive(Deserialize, Debug)]
pub struct AddToCartPayload {
  pub user_id: Option<Uuid>,
  pub product_id: Option<Uuid>,
  pub quantity: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateCartItemPayload {
  pub cart_item_id: Option<Uuid>,
  // Raw JSON so a non-numeric quantity is rejected by our validation (with
  // the documented message) rather than by the JSON extractor.
  pub quantity: Option<serde_json::Value>,
}

#[instrument(name = "handler::get_cart", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn get_cart_handler(app_state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let (cart_id, items) = cart::view_cart(app_state.backend.as_ref(), user_id).await?;

  Ok(HttpResponse::Ok().json(json!({ "cart_id": cart_id, "items": items })))
}

#[instrument(name = "handler::add_to_cart", skip(app_state, payload))]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AddToCartPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let (user_id, product_id) = match (payload.user_id, payload.product_id) {
    (Some(user_id), Some(product_id)) => (user_id, product_id),
    _ => {
      return Err(AppError::Validation("user_id and product_id are required".to_string()));
    }
  };
  let quantity = payload.quantity.unwrap_or(1);
  if quantity < 1 {
    return Err(AppError::Validation("quantity must be a positive integer".to_string()));
  }

  let item = cart::add_item(app_state.backend.as_ref(), user_id, product_id, quantity).await?;
  info!(cart_item_id = %item.id, quantity = item.quantity, "Item added to cart.");
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(name = "handler::update_cart_item", skip(app_state, payload))]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<UpdateCartItemPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let cart_item_id = payload
    .cart_item_id
    .ok_or_else(|| AppError::Validation("cart_item_id and numeric quantity required".to_string()))?;
  // Validate before any write: quantity must be a positive integer.
  let quantity = payload
    .quantity
    .as_ref()
    .and_then(|value| value.as_i64())
    .ok_or_else(|| AppError::Validation("cart_item_id and numeric quantity required".to_string()))?;
  if quantity < 1 {
    return Err(AppError::Validation("quantity must be a positive integer".to_string()));
  }

  let item = cart::update_item(app_state.backend.as_ref(), cart_item_id, quantity).await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, path), fields(cart_item_id = %path.as_ref()))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let cart_item_id = path.into_inner();
  cart::remove_item(app_state.backend.as_ref(), cart_item_id).await?;

  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[instrument(name = "handler::cart_summary", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn cart_summary_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let backend = app_state.backend.as_ref();

  let user_cart = cart::resolve_cart(backend, user_id).await?;
  let totals = cart::summarize(backend, user_cart.id, app_state.config.tax_rate).await?;
  if totals.subtotal == 0.0 {
    warn!(cart_id = %user_cart.id, "Cart summary requested for an empty or unpriced cart.");
  }

  Ok(HttpResponse::Ok().json(json!({
    "cart_id": user_cart.id,
    "subtotal": totals.subtotal,
    "tax": totals.tax,
    "total": totals.total,
  })))
}
