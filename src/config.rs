// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Base URL of the managed Supabase project (without the /rest/v1 suffix).
  pub supabase_url: String,
  /// Service-role key. Server-only credential, never exposed to clients.
  pub supabase_service_role_key: String,

  /// Tax rate applied by the cart aggregator, e.g. 0.10 for 10%.
  pub tax_rate: f64,

  /// Run the idempotent fixture loader once on startup.
  pub seed_on_start: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .or_else(|_| get_env("PORT"))
      .unwrap_or_else(|_| "5000".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let supabase_url = get_env("SUPABASE_URL")?;
    let supabase_service_role_key = get_env("SUPABASE_SERVICE_ROLE_KEY")?;

    let tax_rate = get_env("TAX_RATE")
      .unwrap_or_else(|_| "0.10".to_string())
      .parse::<f64>()
      .map_err(|e| AppError::Config(format!("Invalid TAX_RATE: {}", e)))?;
    if !(0.0..1.0).contains(&tax_rate) {
      return Err(AppError::Config(format!(
        "TAX_RATE must be within [0.0, 1.0), got {}",
        tax_rate
      )));
    }

    let seed_on_start = get_env("SEED_ON_START")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_ON_START value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      supabase_url,
      supabase_service_role_key,
      tax_rate,
      seed_on_start,
    })
  }
}
