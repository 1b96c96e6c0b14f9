// src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::backend::SelectQuery;
use crate::errors::AppError;
use crate::models::User;
use crate::services::row;
use crate::state::AppState;

/// Helper listing for picking a user id during development; capped at 100.
#[instrument(name = "handler::list_users", skip(app_state))]
pub async fn list_users_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let rows = app_state
    .backend
    .select("users", SelectQuery::new().columns("id, email, name").limit(100))
    .await?;
  let users: Vec<User> = rows.into_iter().map(row).collect::<Result<_, _>>()?;

  info!(count = users.len(), "Listed users.");
  Ok(HttpResponse::Ok().json(users))
}
