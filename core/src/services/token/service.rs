//! Main token service implementation

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;
use crate::services::deadline::with_deadline;

use super::config::TokenServiceConfig;
use super::validator::TokenValidator;

/// Number of random bytes in a refresh token (hex-encoded to 64 characters)
const REFRESH_TOKEN_BYTES: usize = 32;

/// Service for issuing, rotating and revoking tokens
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    validator: TokenValidator,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for persistence
    /// * `config` - Token service configuration
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let validator = TokenValidator::new(&config.jwt_secret).with_issuer(&config.issuer);

        Self {
            repository,
            config,
            encoding_key,
            validator,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Validator sharing this service's secret and issuer
    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }

    /// Issues an access/refresh pair for a user
    ///
    /// The refresh record is persisted before anything is returned; if the
    /// store rejects it, no pair is handed out.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The issued pair
    /// * `Err(DomainError)` - Signing or persistence failed
    pub async fn issue_pair(&self, user: &User) -> Result<TokenPair, DomainError> {
        let now = Utc::now();
        let access_token = self.issue_access_token_at(user.id, user.role, now)?;

        let refresh_token = generate_refresh_token_value();
        let record = RefreshToken::new(
            user.id,
            hash_token(&refresh_token),
            expiry_after(now, self.config.refresh_token_ttl_minutes)?,
        )?;

        with_deadline(
            self.config.store_timeout,
            "save_refresh_token",
            self.repository.save_refresh_token(record),
        )
        .await
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "failed to persist refresh token");
            e
        })?;

        debug!(user_id = %user.id, "issued token pair");
        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl_seconds(),
        ))
    }

    /// Signs an access token as if issued at `issued_at`
    pub fn issue_access_token_at(
        &self,
        user_id: Uuid,
        role: UserRole,
        issued_at: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let ttl = minutes(self.config.access_token_ttl_minutes)?;
        let claims = Claims::new(user_id, role, self.config.issuer.clone(), issued_at, ttl)?;
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign access token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verifies a bare access token at the current time
    pub fn verify_access_token(&self, token: &str) -> Result<AuthenticatedUser, DomainError> {
        Ok(self.validator.verify_token_at(token, Utc::now().timestamp())?)
    }

    /// Consumes a refresh token
    ///
    /// The record is removed by one atomic take, so among concurrent callers
    /// presenting the same value only one gets it back. An expired record is
    /// still removed, then rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshToken)` - The consumed, unexpired record
    /// * `Err(TokenError::InvalidRefreshToken)` - Unknown or already redeemed
    /// * `Err(TokenError::RefreshTokenExpired)` - Past its expiry
    pub async fn consume_refresh_token(&self, refresh_token: &str) -> Result<RefreshToken, DomainError> {
        let token_hash = hash_token(refresh_token);

        let record = with_deadline(
            self.config.store_timeout,
            "take_by_token_hash",
            self.repository.take_by_token_hash(&token_hash),
        )
        .await?
        .ok_or(TokenError::InvalidRefreshToken)?;

        if record.is_expired() {
            debug!(user_id = %record.user_id, "expired refresh token presented");
            return Err(TokenError::RefreshTokenExpired.into());
        }

        Ok(record)
    }

    /// Revokes the single refresh token presented
    ///
    /// Access tokens already issued for the session stay valid until they
    /// expire on their own.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError> {
        let token_hash = hash_token(refresh_token);

        let record = with_deadline(
            self.config.store_timeout,
            "take_by_token_hash",
            self.repository.take_by_token_hash(&token_hash),
        )
        .await?
        .ok_or(TokenError::InvalidRefreshToken)?;

        info!(user_id = %record.user_id, "refresh token revoked");
        Ok(())
    }

    /// Revokes every refresh token of a user
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of tokens revoked
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let count = with_deadline(
            self.config.store_timeout,
            "delete_by_user_id",
            self.repository.delete_by_user_id(user_id),
        )
        .await?;

        info!(user_id = %user_id, count, "revoked all refresh tokens for user");
        Ok(count)
    }
}

/// Lifetime in minutes as a `Duration`; out-of-range values cannot be signed
fn minutes(value: i64) -> Result<Duration, DomainError> {
    Duration::try_minutes(value).ok_or_else(|| {
        error!(minutes = value, "token lifetime out of range");
        DomainError::Token(TokenError::TokenGenerationFailed)
    })
}

fn expiry_after(start: DateTime<Utc>, ttl_minutes: i64) -> Result<DateTime<Utc>, DomainError> {
    start
        .checked_add_signed(minutes(ttl_minutes)?)
        .ok_or(DomainError::Token(TokenError::TokenGenerationFailed))
}

/// Hex-encoded SHA-256 of a refresh token, the form kept in the store
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fresh random refresh token value from the OS CSPRNG
fn generate_refresh_token_value() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
