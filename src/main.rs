// src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use spellcart::backend::SupabaseBackend;
use spellcart::config::AppConfig;
use spellcart::services::seed;
use spellcart::state::AppState;
use spellcart::web::configure_app_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting spellcart server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  let backend = match SupabaseBackend::new(&app_config) {
    Ok(client) => Arc::new(client),
    Err(e) => {
      tracing::error!(error = %e, "Failed to construct the backend client.");
      panic!("Backend client error: {}", e);
    }
  };

  let app_state = AppState {
    backend: backend.clone(),
    config: app_config.clone(),
  };

  if app_config.seed_on_start {
    if let Err(e) = seed::run(app_state.backend.as_ref()).await {
      tracing::error!(error = %e, "Startup fixture seeding failed.");
    }
  }

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
