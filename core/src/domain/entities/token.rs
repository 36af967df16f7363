//! Token entities: access token claims, persisted refresh tokens and issued pairs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;
use crate::errors::{TokenError, ValidationError};

/// Claim set signed into every access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Role of the subject at issuance time
    pub role: UserRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Builds access token claims valid for `ttl` starting at `issued_at`
    ///
    /// Fails with `TokenGenerationFailed` when the expiry falls outside the
    /// representable date range.
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: user_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.into(),
        })
    }

    /// Parses the subject as a user ID
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidUserId)
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Persisted refresh token record
///
/// Only the SHA-256 digest of the bearer string is stored. The plain
/// value exists solely in the response handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Hex-encoded SHA-256 of the bearer string
    pub token_hash: String,

    /// Absolute expiry
    pub expires_at: DateTime<Utc>,

    /// When the token was minted
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new record; `expires_at` must be strictly in the future
    pub fn new(
        user_id: Uuid,
        token_hash: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let token_hash = token_hash.into();
        if token_hash.is_empty() {
            return Err(ValidationError::RequiredField { field: "token".to_string() });
        }

        let now = Utc::now();
        if expires_at <= now {
            return Err(ValidationError::InvalidFormat {
                field: "expires_at".to_string(),
                reason: "must be in the future".to_string(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at,
            created_at: now,
        })
    }

    /// Creates a record expiring `ttl` from now
    pub fn with_ttl(user_id: Uuid, token_hash: impl Into<String>, ttl: Duration) -> Result<Self, ValidationError> {
        let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(|| ValidationError::InvalidFormat {
            field: "expires_at".to_string(),
            reason: "out of range".to_string(),
        })?;
        Self::new(user_id, token_hash, expires_at)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Access/refresh pair handed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}
