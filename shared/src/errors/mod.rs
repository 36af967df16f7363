//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,

    /// Short human-readable reason
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const EMAIL_ALREADY_EXISTS: &str = "email_already_exists";
    pub const USERNAME_ALREADY_EXISTS: &str = "username_already_exists";
    pub const REGISTRATION_DISABLED: &str = "registration_disabled";
    pub const MISSING_AUTHORIZATION_HEADER: &str = "missing_authorization_header";
    pub const INVALID_AUTHORIZATION_FORMAT: &str = "invalid_authorization_format";
    pub const INVALID_TOKEN: &str = "invalid_token";
    pub const INVALID_USER_ID: &str = "invalid_user_id";
    pub const INVALID_CLAIMS: &str = "invalid_claims";
    pub const INVALID_REFRESH_TOKEN: &str = "invalid_refresh_token";
    pub const REFRESH_TOKEN_EXPIRED: &str = "refresh_token_expired";
    pub const TOKEN_GENERATION_FAILED: &str = "token_generation_failed";
    pub const NOT_FOUND: &str = "not_found";
    pub const STORE_ERROR: &str = "store_error";
    pub const STORE_TIMEOUT: &str = "store_timeout";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
