//! Deadline wrapper for store calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::DomainError;

/// Runs a store call, failing with `StoreTimeout` once `timeout` elapses
///
/// The inner future is dropped on expiry, which cancels the call.
pub(crate) async fn with_deadline<T, F>(
    timeout: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = timeout.as_millis() as u64, "store call exceeded deadline");
            Err(DomainError::StoreTimeout {
                operation: operation.to_string(),
            })
        }
    }
}
