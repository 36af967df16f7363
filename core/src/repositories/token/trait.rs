//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// Tokens are addressed by the SHA-256 digest of their bearer string; the
/// plain value never reaches an implementation.
///
/// # Concurrency
/// `take_by_token_hash` must be atomic: when several callers race on the
/// same digest, exactly one receives `Some`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token to the repository
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate digest)
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found
    /// * `Ok(None)` - No token found with given hash
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find all refresh tokens owned by a user, expired ones included
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError>;

    /// Delete a token by record ID
    ///
    /// # Returns
    /// * `Ok(true)` - Token was deleted
    /// * `Ok(false)` - Token not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Atomically find and delete a token by its hashed value
    ///
    /// Returns the record as it was before deletion. This is the redemption
    /// primitive: a token can be taken at most once.
    ///
    /// # Example
    /// ```no_run
    /// # use blog_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.take_by_token_hash("sha256_hash_of_token").await? {
    ///     Some(token) => println!("redeemed token of user {}", token.user_id),
    ///     None => println!("unknown or already redeemed"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn take_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Delete every token owned by a user ("log out everywhere")
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens deleted
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete all tokens whose expiry is at or before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired tokens deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Count tokens for a user
    async fn count_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let tokens = self.find_by_user_id(user_id).await?;
        Ok(tokens.len())
    }
}
