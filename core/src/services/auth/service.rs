//! Main authentication service implementation

use std::sync::Arc;

use blog_shared::validation::{
    normalize_email, validators, PASSWORD_MIN_LENGTH, USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{CredentialError, DomainError, ValidationError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::deadline::with_deadline;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// bcrypt truncates input beyond this many bytes
const PASSWORD_MAX_BYTES: usize = 72;

/// Authentication service orchestrating credential checks and token lifecycle
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repository: Arc<U>,
    token_service: Arc<TokenService<T>>,
    config: AuthServiceConfig,
    /// Compared against when the email is unknown, so both failure paths cost one bcrypt verify
    dummy_hash: String,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Credential store
    /// * `token_service` - Token issuance and rotation
    /// * `config` - Service configuration
    pub async fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        config: AuthServiceConfig,
    ) -> Result<Self, DomainError> {
        let dummy_hash = hash_password("timing-equalization-placeholder", config.bcrypt_cost).await?;

        Ok(Self {
            user_repository,
            token_service,
            config,
            dummy_hash,
        })
    }

    pub fn token_service(&self) -> &TokenService<T> {
        &self.token_service
    }

    /// Register a new account
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user (standard role, unverified)
    /// * `Err(DomainError::Validation)` - Malformed email, username or password
    /// * `Err(DomainError::Credential)` - Email/username taken or registration disabled
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<User, DomainError> {
        if !self.config.allow_registration {
            return Err(CredentialError::RegistrationDisabled.into());
        }

        let email = normalize_email(email);
        let username = username.trim();
        validate_registration(&email, username, password)?;

        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let user = User::new(email, username, password_hash)?;

        let user = with_deadline(
            self.config.store_timeout,
            "create_user",
            self.user_repository.create(user),
        )
        .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Check an email/password pair against the credential store
    ///
    /// Unknown email and wrong password both yield
    /// `CredentialError::InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        if !validators::not_empty(email) {
            return Err(ValidationError::RequiredField { field: "email".to_string() }.into());
        }
        if password.is_empty() {
            return Err(ValidationError::RequiredField { field: "password".to_string() }.into());
        }

        let email = normalize_email(email);
        let user = with_deadline(
            self.config.store_timeout,
            "find_user_by_email",
            self.user_repository.find_by_email(&email),
        )
        .await?;

        let Some(user) = user else {
            verify_password(password, &self.dummy_hash).await?;
            warn!("login failed: unknown email");
            return Err(CredentialError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "login failed: wrong password");
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Authenticate and issue a token pair
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let user = self.authenticate(email, password).await?;
        let pair = self.token_service.issue_pair(&user).await?;

        info!(user_id = %user.id, "user logged in");
        Ok(pair)
    }

    /// Redeem a refresh token for a new pair
    ///
    /// The presented token is consumed first; whatever happens afterwards,
    /// it cannot be redeemed again.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh pair
    /// * `Err(TokenError::InvalidRefreshToken)` - Unknown or already used
    /// * `Err(TokenError::RefreshTokenExpired)` - Past its expiry
    /// * `Err(DomainError::NotFound)` - Owning user no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let record = self.token_service.consume_refresh_token(refresh_token).await?;

        let user = with_deadline(
            self.config.store_timeout,
            "find_user_by_id",
            self.user_repository.find_by_id(record.user_id),
        )
        .await?
        .ok_or_else(|| {
            warn!(user_id = %record.user_id, "refresh token belongs to a missing user");
            DomainError::not_found("user")
        })?;

        let pair = self.token_service.issue_pair(&user).await?;

        info!(user_id = %user.id, "refresh token rotated");
        Ok(pair)
    }

    /// Revoke the presented refresh token
    pub async fn logout(&self, refresh_token: &str) -> Result<(), DomainError> {
        self.token_service.revoke(refresh_token).await
    }

    /// Revoke every refresh token of a user
    pub async fn logout_all(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.token_service.revoke_all_for_user(user_id).await
    }

    /// Change a user's password and end all of their sessions
    ///
    /// Outstanding access tokens remain valid until they expire.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        validate_password(new_password)?;

        let mut user = with_deadline(
            self.config.store_timeout,
            "find_user_by_id",
            self.user_repository.find_by_id(user_id),
        )
        .await?
        .ok_or_else(|| DomainError::not_found("user"))?;

        if !verify_password(current_password, &user.password_hash).await? {
            return Err(CredentialError::InvalidCredentials.into());
        }

        let new_hash = hash_password(new_password, self.config.bcrypt_cost).await?;
        user.change_password(new_hash)?;

        with_deadline(
            self.config.store_timeout,
            "update_user",
            self.user_repository.update(user),
        )
        .await?;

        let revoked = self.token_service.revoke_all_for_user(user_id).await?;
        info!(user_id = %user_id, revoked, "password changed");
        Ok(())
    }
}

fn validate_registration(email: &str, username: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::RequiredField { field: "email".to_string() });
    }
    if !validators::is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !validators::length_between(username, USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH) {
        return Err(ValidationError::InvalidLength {
            field: "username".to_string(),
            min: USERNAME_MIN_LENGTH,
            max: USERNAME_MAX_LENGTH,
        });
    }
    validate_password(password)
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_LENGTH || password.len() > PASSWORD_MAX_BYTES {
        return Err(ValidationError::InvalidLength {
            field: "password".to_string(),
            min: PASSWORD_MIN_LENGTH,
            max: PASSWORD_MAX_BYTES,
        });
    }
    Ok(())
}
