//! # Infrastructure Layer
//!
//! Concrete implementations of the store contracts defined in `blog_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL credential and refresh-token stores using SQLx,
//!   plus connection pool management and schema bootstrap
//! - **Memory**: process-local stores for development and tests
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use blog_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// In-memory store implementations
pub mod memory;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
