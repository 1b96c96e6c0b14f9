// src/models/cart.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's single persistent cart, created lazily on first access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
  pub id: Uuid,
  pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCart {
  pub user_id: Uuid,
}
