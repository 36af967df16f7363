//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Schema bootstrap for the `users` and `refresh_tokens` tables
//! - Store implementations of the core repository traits

pub mod connection;
pub mod mysql;
mod schema;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlTokenRepository, MySqlUserRepository};
