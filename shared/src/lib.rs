//! Shared utilities and common types for the Simple Blog server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures
//! - Validation helpers (email, username, password)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CleanupConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LogFormat, LoggingConfig, ServerConfig, StoreBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
