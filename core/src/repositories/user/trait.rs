//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and uses Result types for error handling.
//! Implementations own uniqueness of email and username: `create` must
//! reject duplicates atomically instead of relying on a prior lookup.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use blog_core::repositories::UserRepository;
/// use blog_core::domain::entities::user::User;
/// use blog_core::errors::DomainError;
///
/// struct NullUserRepository;
///
/// #[async_trait]
/// impl UserRepository for NullUserRepository {
///     async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, DomainError> { Ok(None) }
///     async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> { Ok(None) }
///     async fn find_by_username(&self, _username: &str) -> Result<Option<User>, DomainError> { Ok(None) }
///     async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
///     async fn update(&self, user: User) -> Result<User, DomainError> { Ok(user) }
///     async fn delete(&self, _id: Uuid) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their (normalized) email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Credential(EmailAlreadyExists | UsernameAlreadyExists))` - Duplicate
    /// * `Err(DomainError)` - Store error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No user with that ID exists
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user by ID
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
