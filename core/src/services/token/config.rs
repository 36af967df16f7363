//! Configuration for the token service

use std::time::Duration;

use blog_shared::{AuthConfig, JwtConfig};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret shared with every validator
    pub jwt_secret: String,
    /// `iss` claim written into access tokens
    pub issuer: String,
    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,
    /// Refresh token lifetime in minutes
    pub refresh_token_ttl_minutes: i64,
    /// Deadline for each store call
    pub store_timeout: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from_jwt_config(&JwtConfig::default(), Duration::from_secs(5))
    }
}

impl TokenServiceConfig {
    pub fn from_jwt_config(jwt: &JwtConfig, store_timeout: Duration) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            access_token_ttl_minutes: jwt.access_token_ttl_minutes,
            refresh_token_ttl_minutes: jwt.refresh_token_ttl_minutes,
            store_timeout,
        }
    }

    /// Access token lifetime in seconds, as reported in `expires_in`
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.access_token_ttl_minutes.saturating_mul(60)
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self::from_jwt_config(&config.jwt, Duration::from_millis(config.store_timeout_ms))
    }
}
