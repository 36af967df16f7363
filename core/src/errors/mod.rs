//! Domain-specific error types and error handling.

mod types;

pub use types::{CredentialError, TokenError, ValidationError};

use blog_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Persistence layer failure; never shown verbatim to callers
    #[error("store error: {message}")]
    Store { message: String },

    /// A store call exceeded its deadline
    #[error("store operation timed out: {operation}")]
    StoreTimeout { operation: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound { resource: resource.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        DomainError::Store { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal { message: message.into() }
    }

    /// Machine-readable reason string
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation(e) => e.error_code(),
            DomainError::Credential(e) => e.error_code(),
            DomainError::Token(e) => e.error_code(),
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Store { .. } => error_codes::STORE_ERROR,
            DomainError::StoreTimeout { .. } => error_codes::STORE_TIMEOUT,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }

    /// Infrastructure failures that surface as 5xx
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            DomainError::Store { .. }
                | DomainError::StoreTimeout { .. }
                | DomainError::Internal { .. }
                | DomainError::Token(TokenError::TokenGenerationFailed)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
#[path = "tests/domain_error_tests.rs"]
mod tests;
