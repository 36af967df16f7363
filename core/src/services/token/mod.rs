//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access token signing and refresh token issuance
//! - Single-use refresh token rotation and revocation
//! - Stateless bearer token validation
//! - Background cleanup of expired tokens

mod cleanup;
mod config;
mod service;
mod validator;


pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::{hash_token, TokenService};
pub use validator::{extract_bearer_token, TokenValidator};
