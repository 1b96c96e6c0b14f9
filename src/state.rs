// src/state.rs

use crate::backend::DataBackend;
use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  /// Handle to the managed data service. Injected so tests can substitute a
  /// fake; shared read-only for the process lifetime.
  pub backend: Arc<dyn DataBackend>,
  pub config: Arc<AppConfig>,
}
