// src/services/checkout.rs

//! Checkout workflow: order creation, order-line materialization and
//! cart-clearing as a sequence of dependent writes.
//!
//! The backend offers no cross-call transactions, so the sequence uses an
//! order status field plus compensating actions instead: the order starts
//! `pending`, any failure after its creation deletes the materialized lines
//! and marks it `failed`, and only a fully completed sequence flips it to
//! `committed`. The cart is cleared exclusively on the success path, so a
//! failed checkout never loses cart contents.

use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{cart, payload, row};
use crate::backend::{BackendError, DataBackend, Filter};
use crate::errors::{AppError, Result};
use crate::models::{NewOrder, NewOrderItem, Order, OrderStatus};

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
  pub order_id: Uuid,
  pub total: f64,
}

/// Convert the user's cart into an immutable order and clear the cart.
///
/// An empty cart is not rejected: it produces a committed order with total 0
/// and no order items.
#[instrument(name = "checkout::run", skip(backend))]
pub async fn checkout(backend: &dyn DataBackend, user_id: Uuid, tax_rate: f64) -> Result<CheckoutReceipt> {
  // Steps 1-3: resolve the cart, snapshot prices, derive totals.
  let user_cart = cart::resolve_cart(backend, user_id).await?;
  let lines = cart::load_priced_lines(backend, user_cart.id).await?;
  let totals = cart::totals(&lines, tax_rate);

  // Step 4: create the order record, still pending.
  let new_order = NewOrder {
    user_id,
    total: totals.total,
    status: OrderStatus::Pending,
  };
  let mut inserted = backend.insert("orders", &[payload(&new_order)?], None).await?;
  let order: Order = match inserted.pop() {
    Some(value) => row(value)?,
    None => return Err(AppError::Internal("backend returned no row for order insert".to_string())),
  };
  info!(order_id = %order.id, total = order.total, lines = lines.len(), "Created pending order.");

  // Step 5: materialize one order item per cart line, price frozen as
  // observed in step 2.
  if !lines.is_empty() {
    let order_items: Vec<serde_json::Value> = lines
      .iter()
      .map(|line| {
        payload(&NewOrderItem {
          order_id: order.id,
          product_id: line.item.product_id,
          quantity: line.item.quantity,
          price: line.unit_price,
        })
      })
      .collect::<Result<_>>()?;

    if let Err(e) = backend.insert("order_items", &order_items, None).await {
      compensate(backend, order.id, &e).await;
      return Err(e.into());
    }
  }

  // Step 6: empty the cart.
  if let Err(e) = backend
    .delete("cart_items", &[Filter::eq("cart_id", json!(user_cart.id))])
    .await
  {
    compensate(backend, order.id, &e).await;
    return Err(e.into());
  }

  // Step 7: the sequence completed, commit the order.
  backend
    .update(
      "orders",
      &[Filter::eq("id", json!(order.id))],
      json!({ "status": OrderStatus::Committed }),
    )
    .await?;

  info!(order_id = %order.id, total = order.total, "Checkout committed.");
  Ok(CheckoutReceipt {
    order_id: order.id,
    total: order.total,
  })
}

/// Best-effort reversal after a mid-sequence failure: drop any materialized
/// order items and mark the order failed. Compensation failures are logged
/// and swallowed — the original error is what the caller sees.
async fn compensate(backend: &dyn DataBackend, order_id: Uuid, cause: &BackendError) {
  warn!(order_id = %order_id, error = %cause, "Checkout failed mid-sequence, compensating.");

  if let Err(e) = backend
    .delete("order_items", &[Filter::eq("order_id", json!(order_id))])
    .await
  {
    warn!(order_id = %order_id, error = %e, "Failed to delete order items during compensation.");
  }
  if let Err(e) = backend
    .update(
      "orders",
      &[Filter::eq("id", json!(order_id))],
      json!({ "status": OrderStatus::Failed }),
    )
    .await
  {
    warn!(order_id = %order_id, error = %e, "Failed to mark order as failed during compensation.");
  }
}
