// src/web/routes.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::state::AppState;
use crate::web::handlers::{cart_handlers, checkout_handlers, dev_handlers, product_handlers, user_handlers};

/// Liveness probe.
async fn health_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({
    "ok": true,
    "timestamp": Utc::now().to_rfc3339(),
    "port": app_state.config.server_port,
  }))
}

/// Called from `main.rs` (and the HTTP tests) to configure the Actix app.
///
/// Literal cart paths are registered before `/cart/{user_id}` so they are
/// matched first.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_handler))
      .route("/products", web::get().to(product_handlers::list_products_handler))
      .route(
        "/products/{product_id}",
        web::get().to(product_handlers::get_product_handler),
      )
      .route("/users", web::get().to(user_handlers::list_users_handler))
      .route("/cart/add", web::post().to(cart_handlers::add_to_cart_handler))
      .route("/cart/update", web::put().to(cart_handlers::update_cart_item_handler))
      .route(
        "/cart/remove/{cart_item_id}",
        web::delete().to(cart_handlers::remove_cart_item_handler),
      )
      .route("/cart/{user_id}", web::get().to(cart_handlers::get_cart_handler))
      .route(
        "/cart-summary/{user_id}",
        web::get().to(cart_handlers::cart_summary_handler),
      )
      .route("/checkout", web::post().to(checkout_handlers::checkout_handler))
      .route("/dev/seed", web::post().to(dev_handlers::seed_handler)),
  );
}
