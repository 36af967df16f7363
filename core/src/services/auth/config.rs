//! Configuration for the authentication service

use std::time::Duration;

use blog_shared::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
    /// Deadline for each user store call
    pub store_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allow_registration: true,
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
            allow_registration: config.allow_registration,
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }
}
