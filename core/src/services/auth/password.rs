//! Password hashing helpers
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool rather
//! than on the async worker that handles the request.

use tracing::warn;

use crate::errors::DomainError;

/// Hashes a password with bcrypt at the given cost
pub async fn hash_password(password: &str, cost: u32) -> Result<String, DomainError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
}

/// Compares a password against a stored bcrypt hash
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| DomainError::internal(format!("password verification task failed: {}", e)))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            warn!(error = %e, "stored password hash could not be parsed");
            Ok(false)
        }
    }
}
