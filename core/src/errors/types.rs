//! Error types for credentials, tokens and input validation
//!
//! Display strings double as the short reason returned to API callers, so
//! they stay deliberately terse and never echo secrets back.

use blog_shared::error_codes;
use thiserror::Error;

/// Credential and account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Unknown email or wrong password; the two cases are indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("username already exists")]
    UsernameAlreadyExists,

    #[error("registration is disabled")]
    RegistrationDisabled,
}

impl CredentialError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CredentialError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            CredentialError::EmailAlreadyExists => error_codes::EMAIL_ALREADY_EXISTS,
            CredentialError::UsernameAlreadyExists => error_codes::USERNAME_ALREADY_EXISTS,
            CredentialError::RegistrationDisabled => error_codes::REGISTRATION_DISABLED,
        }
    }
}

/// Token errors
///
/// Expired, forged and malformed access tokens all collapse into
/// `InvalidOrExpiredToken`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("missing authorization header")]
    MissingAuthorizationHeader,

    #[error("invalid authorization format")]
    InvalidAuthorizationFormat,

    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("invalid user ID in token")]
    InvalidUserId,

    #[error("invalid token claims")]
    InvalidClaims,

    #[error("invalid refresh token")]
    InvalidRefreshToken,

    #[error("refresh token expired")]
    RefreshTokenExpired,

    #[error("token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::MissingAuthorizationHeader => error_codes::MISSING_AUTHORIZATION_HEADER,
            TokenError::InvalidAuthorizationFormat => error_codes::INVALID_AUTHORIZATION_FORMAT,
            TokenError::InvalidOrExpiredToken => error_codes::INVALID_TOKEN,
            TokenError::InvalidUserId => error_codes::INVALID_USER_ID,
            TokenError::InvalidClaims => error_codes::INVALID_CLAIMS,
            TokenError::InvalidRefreshToken => error_codes::INVALID_REFRESH_TOKEN,
            TokenError::RefreshTokenExpired => error_codes::REFRESH_TOKEN_EXPIRED,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("invalid {field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("invalid email")]
    InvalidEmail,

    #[error("{field} must be between {min} and {max} characters")]
    InvalidLength { field: String, min: usize, max: usize },

    #[error("malformed request body: {reason}")]
    MalformedBody { reason: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        error_codes::VALIDATION_ERROR
    }

    /// Name of the offending field, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::InvalidLength { field, .. } => Some(field),
            ValidationError::InvalidEmail => Some("email"),
            ValidationError::MalformedBody { .. } => None,
        }
    }
}
