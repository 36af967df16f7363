//! Authentication and token configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_string_or, ConfigError};

/// Signing secret used when `JWT_SECRET` is not set. Development only.
pub const DEFAULT_JWT_SECRET: &str = "dev_secret_key";

/// Issuer claim used when `JWT_ISSUER` is not set.
pub const DEFAULT_JWT_ISSUER: &str = "vcd-simple-blog";

/// Upper bound for either token lifetime: ten years, in minutes
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365 * 10;

/// JWT authentication configuration
///
/// The signing algorithm is always HS256; it is deliberately absent from
/// this struct so no environment value can select a different one.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing and verifying access tokens
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,

    /// Refresh token lifetime in minutes
    pub refresh_token_ttl_minutes: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_ttl_minutes: 15,
            refresh_token_ttl_minutes: 10080, // 7 days
            issuer: String::from(DEFAULT_JWT_ISSUER),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load from `JWT_SECRET`, `ACCESS_TOKEN_TTL`, `REFRESH_TOKEN_TTL` and `JWT_ISSUER`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            secret: env_string_or("JWT_SECRET", &defaults.secret),
            access_token_ttl_minutes: env_or("ACCESS_TOKEN_TTL", defaults.access_token_ttl_minutes)?,
            refresh_token_ttl_minutes: env_or("REFRESH_TOKEN_TTL", defaults.refresh_token_ttl_minutes)?,
            issuer: env_string_or("JWT_ISSUER", &defaults.issuer),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl_minutes = minutes;
        self
    }

    /// Set refresh token lifetime in minutes
    pub fn with_refresh_ttl_minutes(mut self, minutes: i64) -> Self {
        self.refresh_token_ttl_minutes = minutes;
        self
    }

    /// Set the issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Access token lifetime in seconds, as reported in `expires_in`
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.access_token_ttl_minutes.saturating_mul(60)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Reject configurations that can never issue a usable token
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        check_ttl("ACCESS_TOKEN_TTL", self.access_token_ttl_minutes)?;
        check_ttl("REFRESH_TOKEN_TTL", self.refresh_token_ttl_minutes)?;
        Ok(())
    }
}

fn check_ttl(key: &str, minutes: i64) -> Result<(), ConfigError> {
    if (1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        key: key.to_string(),
        reason: format!("must be between 1 and {} minutes", MAX_TOKEN_TTL_MINUTES),
    })
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,

    /// Whether new accounts may register
    pub allow_registration: bool,

    /// Deadline applied to every store call, in milliseconds
    pub store_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: 12,
            allow_registration: true,
            store_timeout_ms: 5000,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let bcrypt_cost = env_or("BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST".to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Self {
            jwt: JwtConfig::from_env()?,
            bcrypt_cost,
            allow_registration: env_or("ALLOW_REGISTRATION", defaults.allow_registration)?,
            store_timeout_ms: env_or("STORE_TIMEOUT_MS", defaults.store_timeout_ms)?,
        })
    }
}

/// Periodic refresh-token sweep configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// How often the sweep runs, in seconds
    pub interval_seconds: u64,

    /// Whether the sweep is started at all
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

impl CleanupConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            interval_seconds: env_or("TOKEN_CLEANUP_INTERVAL_SECS", defaults.interval_seconds)?,
            enabled: env_or("TOKEN_CLEANUP_ENABLED", defaults.enabled)?,
        })
    }
}
