// src/lib.rs

//! spellcart: a small e-commerce REST backend over a managed data service.
//!
//! The crate is a thin pass-through: each HTTP endpoint validates a couple of
//! fields, issues one or two calls against the managed table store, and
//! reshapes the response. The only multi-step behavior is the cart/checkout
//! aggregation workflow in [`services::checkout`].

pub mod backend;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

// Re-exports for the binary and for integration tests
pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
