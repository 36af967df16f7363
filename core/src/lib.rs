//! # Simple Blog Core
//!
//! Core domain layer for Simple Blog authentication.
//! This crate contains domain entities, the credential and token store
//! contracts, and the services that issue, rotate, revoke and validate
//! tokens.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
