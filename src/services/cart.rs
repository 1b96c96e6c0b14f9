// src/services/cart.rs

//! Cart resolver, mutation helpers and the read-only aggregator.

use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{payload, row};
use crate::backend::{DataBackend, Filter, SelectQuery};
use crate::errors::{AppError, Result};
use crate::models::{Cart, CartItem, CartItemWithProduct, NewCart, NewCartItem, Product};

/// Find or create the user's single cart.
///
/// Runs as an atomic insert-on-conflict-do-nothing keyed on `user_id`
/// followed by a read-back of the winning row, so concurrent first-time
/// requests for the same user converge on one cart. Requires a uniqueness
/// constraint on `carts.user_id` at the backend.
#[instrument(name = "cart::resolve", skip(backend))]
pub async fn resolve_cart(backend: &dyn DataBackend, user_id: Uuid) -> Result<Cart> {
  let inserted = backend
    .insert("carts", &[payload(&NewCart { user_id })?], Some("user_id"))
    .await?;
  if let Some(value) = inserted.into_iter().next() {
    let cart: Cart = row(value)?;
    info!(cart_id = %cart.id, "Created cart on first access.");
    return Ok(cart);
  }

  // The insert was a no-op, so a cart row already exists.
  let mut rows = backend
    .select(
      "carts",
      SelectQuery::new().filter(Filter::eq("user_id", json!(user_id))).limit(1),
    )
    .await?;
  match rows.pop() {
    Some(value) => row(value),
    None => Err(AppError::Internal(format!(
      "cart row for user {} missing after upsert",
      user_id
    ))),
  }
}

/// Cart contents with each line's product embedded.
pub async fn view_cart(backend: &dyn DataBackend, user_id: Uuid) -> Result<(Uuid, Vec<CartItemWithProduct>)> {
  let cart = resolve_cart(backend, user_id).await?;
  let items = load_items(backend, cart.id).await?;
  let products = load_products(backend, &items).await?;

  let lines = items
    .into_iter()
    .map(|item| CartItemWithProduct {
      id: item.id,
      product_id: item.product_id,
      quantity: item.quantity,
      product: products.get(&item.product_id).cloned(),
    })
    .collect();
  Ok((cart.id, lines))
}

/// Add a product to the user's cart.
///
/// An existing (cart, product) row gets the quantity added to it rather than
/// replaced; otherwise a new row is created.
#[instrument(name = "cart::add_item", skip(backend))]
pub async fn add_item(backend: &dyn DataBackend, user_id: Uuid, product_id: Uuid, quantity: i64) -> Result<CartItem> {
  let cart = resolve_cart(backend, user_id).await?;

  let mut existing = backend
    .select(
      "cart_items",
      SelectQuery::new()
        .filter(Filter::eq("cart_id", json!(cart.id)))
        .filter(Filter::eq("product_id", json!(product_id)))
        .limit(1),
    )
    .await?;

  if let Some(value) = existing.pop() {
    let item: CartItem = row(value)?;
    let merged = item.quantity + quantity;
    let mut updated = backend
      .update(
        "cart_items",
        &[Filter::eq("id", json!(item.id))],
        json!({ "quantity": merged }),
      )
      .await?;
    info!(cart_item_id = %item.id, quantity = merged, "Merged quantity into existing cart item.");
    return match updated.pop() {
      Some(value) => row(value),
      None => Err(AppError::Internal(format!("cart item {} vanished during update", item.id))),
    };
  }

  let new_item = NewCartItem {
    cart_id: cart.id,
    product_id,
    quantity,
  };
  let mut inserted = backend.insert("cart_items", &[payload(&new_item)?], None).await?;
  match inserted.pop() {
    Some(value) => row(value),
    None => Err(AppError::Internal("backend returned no row for cart item insert".to_string())),
  }
}

/// Overwrite a cart item's quantity. The caller validates the quantity.
#[instrument(name = "cart::update_item", skip(backend))]
pub async fn update_item(backend: &dyn DataBackend, cart_item_id: Uuid, quantity: i64) -> Result<CartItem> {
  let mut updated = backend
    .update(
      "cart_items",
      &[Filter::eq("id", json!(cart_item_id))],
      json!({ "quantity": quantity }),
    )
    .await?;
  match updated.pop() {
    Some(value) => row(value),
    None => Err(AppError::NotFound(format!("Cart item {} not found.", cart_item_id))),
  }
}

/// Delete a cart item unconditionally. A missing row is indistinguishable
/// from a successful deletion.
#[instrument(name = "cart::remove_item", skip(backend))]
pub async fn remove_item(backend: &dyn DataBackend, cart_item_id: Uuid) -> Result<()> {
  backend
    .delete("cart_items", &[Filter::eq("id", json!(cart_item_id))])
    .await?;
  Ok(())
}

/// A cart line joined with its unit price. A missing product prices as 0.
#[derive(Debug, Clone)]
pub struct PricedLine {
  pub item: CartItem,
  pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartTotals {
  pub subtotal: f64,
  pub tax: f64,
  pub total: f64,
}

/// Round half-away-from-zero at 2 decimals (standard currency rounding).
pub fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

/// Pure derivation of the cart summary. Tax and total are each rounded once.
pub fn totals(lines: &[PricedLine], tax_rate: f64) -> CartTotals {
  let subtotal: f64 = lines.iter().map(|line| line.unit_price * line.item.quantity as f64).sum();
  let tax = round2(subtotal * tax_rate);
  let total = round2(subtotal + tax);
  CartTotals { subtotal, tax, total }
}

/// Fetch the cart's items joined with current product prices.
pub async fn load_priced_lines(backend: &dyn DataBackend, cart_id: Uuid) -> Result<Vec<PricedLine>> {
  let items = load_items(backend, cart_id).await?;
  let products = load_products(backend, &items).await?;
  Ok(
    items
      .into_iter()
      .map(|item| PricedLine {
        unit_price: products.get(&item.product_id).map(|p| p.price).unwrap_or(0.0),
        item,
      })
      .collect(),
  )
}

/// Compute subtotal/tax/total for a cart. Read-only.
#[instrument(name = "cart::summarize", skip(backend))]
pub async fn summarize(backend: &dyn DataBackend, cart_id: Uuid, tax_rate: f64) -> Result<CartTotals> {
  let lines = load_priced_lines(backend, cart_id).await?;
  Ok(totals(&lines, tax_rate))
}

async fn load_items(backend: &dyn DataBackend, cart_id: Uuid) -> Result<Vec<CartItem>> {
  let rows = backend
    .select(
      "cart_items",
      SelectQuery::new().filter(Filter::eq("cart_id", json!(cart_id))),
    )
    .await?;
  rows.into_iter().map(row).collect()
}

/// Batched product lookup for a set of cart items.
async fn load_products(backend: &dyn DataBackend, items: &[CartItem]) -> Result<HashMap<Uuid, Product>> {
  if items.is_empty() {
    return Ok(HashMap::new());
  }
  let ids: Vec<serde_json::Value> = items.iter().map(|item| json!(item.product_id)).collect();
  let rows = backend
    .select("products", SelectQuery::new().filter(Filter::is_in("id", ids)))
    .await?;
  let mut products = HashMap::new();
  for value in rows {
    let product: Product = row(value)?;
    products.insert(product.id, product);
  }
  Ok(products)
}
