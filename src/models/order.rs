// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Checkout progress marker. Orders are created `Pending`, flipped to
/// `Committed` once line items are materialized and the cart is cleared, and
/// marked `Failed` when the compensation path runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Committed,
  Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  /// Fixed at creation time: subtotal + tax, rounded to 2 decimals.
  pub total: f64,
  pub status: OrderStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
  pub user_id: Uuid,
  pub total: f64,
  pub status: OrderStatus,
}
