// src/models/order_item.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable order line. `price` is the unit price observed at checkout, a
/// frozen copy rather than a live reference to the product row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
  pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
  pub price: f64,
}
