//! Bearer token validation.
//!
//! `TokenValidator` is a pure function of (token, secret, clock). It never
//! touches a store, so any service holding the shared secret can verify
//! requests on its own.

use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::user::UserRole;
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::TokenError;

/// Claim set as it arrives on the wire, before typing
///
/// `sub` and `role` are kept untyped here so that a missing or mistyped
/// value maps to its own error instead of a generic decode failure.
#[derive(Debug, Deserialize)]
struct WireClaims {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    role: Option<Value>,
    exp: i64,
}

/// Extracts the token from an `Authorization` header value
///
/// Accepts exactly `Bearer <token>`: one space, case-sensitive scheme.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, TokenError> {
    let header = header
        .filter(|value| !value.is_empty())
        .ok_or(TokenError::MissingAuthorizationHeader)?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(TokenError::InvalidAuthorizationFormat),
    }
}

/// Verifies HS256 access tokens against an injected secret
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Creates a validator pinned to HS256
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify_token_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Additionally require `iss` to equal `issuer`
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        // A token without `iss` would otherwise skip the comparison
        self.validation.required_spec_claims.insert("iss".to_string());
        self
    }

    /// Validates an `Authorization` header value at the current time
    pub fn validate(&self, header: Option<&str>) -> Result<AuthenticatedUser, TokenError> {
        self.validate_at(header, Utc::now().timestamp())
    }

    /// Validates an `Authorization` header value at `now` (Unix seconds)
    pub fn validate_at(&self, header: Option<&str>, now: i64) -> Result<AuthenticatedUser, TokenError> {
        let token = extract_bearer_token(header)?;
        self.verify_token_at(token, now)
    }

    /// Verifies a bare token at `now` (Unix seconds)
    pub fn verify_token_at(&self, token: &str, now: i64) -> Result<AuthenticatedUser, TokenError> {
        let data = decode::<WireClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "access token rejected");
            TokenError::InvalidOrExpiredToken
        })?;
        let claims = data.claims;

        if claims.exp <= now {
            return Err(TokenError::InvalidOrExpiredToken);
        }

        let user_id = match claims.sub {
            Some(Value::String(sub)) => Uuid::parse_str(&sub).map_err(|_| TokenError::InvalidUserId)?,
            _ => return Err(TokenError::InvalidUserId),
        };

        let role = match claims.role {
            None | Some(Value::Null) => UserRole::default(),
            Some(Value::String(role)) => role.parse().map_err(|_| TokenError::InvalidClaims)?,
            Some(_) => return Err(TokenError::InvalidClaims),
        };

        Ok(AuthenticatedUser::new(user_id, role))
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}
