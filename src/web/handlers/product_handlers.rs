// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::backend::{Filter, SelectQuery};
use crate::errors::AppError;
use crate::models::Product;
use crate::services::row;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub search: Option<String>,
  pub category: Option<String>,
  pub sort: Option<String>,
  pub order: Option<String>,
  // Kept as strings: a non-numeric page/limit falls back to the default
  // instead of rejecting the request.
  pub page: Option<String>,
  pub limit: Option<String>,
}

/// 1-based page, floored at 1 when invalid or non-positive.
fn parse_page(raw: Option<&str>) -> u64 {
  raw
    .and_then(|s| s.parse::<i64>().ok())
    .map(|page| page.max(1) as u64)
    .unwrap_or(1)
}

/// Page size, default 20, clamped to 100.
fn parse_limit(raw: Option<&str>) -> u64 {
  raw
    .and_then(|s| s.parse::<i64>().ok())
    .filter(|limit| *limit > 0)
    .map(|limit| (limit as u64).min(MAX_PAGE_SIZE))
    .unwrap_or(DEFAULT_PAGE_SIZE)
}

#[instrument(name = "handler::list_products", skip(app_state, query_params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let params = query_params.into_inner();

  let mut query = SelectQuery::new();
  if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
    query = query.filter(Filter::ilike("name", format!("*{}*", search)));
  }
  if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
    query = query.filter(Filter::eq("category", category));
  }

  // The sort column is passed through unvalidated; an unknown column is a
  // backend error.
  let sort = params.sort.as_deref().unwrap_or("name");
  let ascending = params.order.as_deref().unwrap_or("asc") == "asc";
  let page = parse_page(params.page.as_deref());
  let limit = parse_limit(params.limit.as_deref());
  let query = query.order_by(sort, ascending).limit(limit).offset((page - 1) * limit);

  let rows = app_state.backend.select("products", query).await?;
  let products: Vec<Product> = rows.into_iter().map(row).collect::<Result<_, _>>()?;

  info!(count = products.len(), page, limit, "Listed products.");
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  let mut rows = app_state
    .backend
    .select(
      "products",
      SelectQuery::new()
        .filter(Filter::eq("id", serde_json::json!(product_id)))
        .limit(1),
    )
    .await?;

  match rows.pop() {
    Some(value) => {
      let product: Product = row(value)?;
      Ok(HttpResponse::Ok().json(product))
    }
    None => {
      warn!(%product_id, "Product not found.");
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}
