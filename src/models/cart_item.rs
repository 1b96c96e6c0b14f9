// src/models/cart_item.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;

/// A (product, quantity) pairing within a cart. At most one row exists per
/// (cart_id, product_id) pair; adding the same product again bumps quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
  pub id: Uuid,
  pub cart_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCartItem {
  pub cart_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
}

/// Cart line as returned by `GET /api/cart/{user_id}`: the item with its
/// product embedded. `product` is `None` when the referenced product row has
/// disappeared.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemWithProduct {
  pub id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
  pub product: Option<Product>,
}
