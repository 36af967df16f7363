//! Authentication service module
//!
//! This module provides account registration and credential checks and
//! drives the token service for login, refresh and logout.

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::AuthService;
