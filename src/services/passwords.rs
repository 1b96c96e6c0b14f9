// src/services/passwords.rs

//! Password hashing for fixture users created by the dev seeder. The backend
//! service owns authentication; this crate only makes sure no plaintext
//! password ever lands in a row it writes.

use crate::errors::{AppError, Result};
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
  Argon2,
};
use tracing::instrument;

/// Hashes a plain-text password using Argon2 with a random salt.
#[instrument(name = "passwords::hash", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| AppError::Internal(format!("Password hashing process failed: {}", e)))?;
  Ok(hash.to_string())
}
