//! MySQL implementations of the core repository traits

mod token_repository_impl;
mod user_repository_impl;

pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use blog_core::errors::DomainError;

/// Wrap a SQLx failure as a store error, keeping the driver message for logs
fn store_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::store(format!("{}: {}", context, e))
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::internal(format!("Failed to get {}: {}", column, e))
}
