//! Unit tests for token entities

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::UserRole;
use crate::errors::{TokenError, ValidationError};

#[test]
fn test_claims_new() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let claims = Claims::new(user_id, UserRole::Author, "vcd-simple-blog", now, Duration::minutes(15)).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, UserRole::Author);
    assert_eq!(claims.iss, "vcd-simple-blog");
    assert_eq!(claims.exp - claims.iat, 900);
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert!(!claims.is_expired_at(now.timestamp()));
    assert!(claims.is_expired_at(claims.exp));
}

#[test]
fn test_claims_invalid_subject() {
    let mut claims = Claims::new(Uuid::new_v4(), UserRole::Standard, "iss", Utc::now(), Duration::minutes(1)).unwrap();
    claims.sub = "not-a-uuid".to_string();
    assert!(matches!(claims.user_id(), Err(TokenError::InvalidUserId)));
}

#[test]
fn test_claims_reject_unrepresentable_expiry() {
    let result = Claims::new(Uuid::new_v4(), UserRole::Standard, "iss", Utc::now(), Duration::milliseconds(i64::MAX));
    assert_eq!(result.unwrap_err(), TokenError::TokenGenerationFailed);
}

#[test]
fn test_refresh_token_new() {
    let user_id = Uuid::new_v4();
    let token = RefreshToken::with_ttl(user_id, "digest", Duration::days(7)).unwrap();

    assert_eq!(token.user_id, user_id);
    assert_eq!(token.token_hash, "digest");
    assert!(!token.is_expired());
    assert!(token.is_expired_at(token.expires_at));
    assert!(token.is_expired_at(Utc::now() + Duration::days(8)));
}

#[test]
fn test_refresh_token_requires_future_expiry() {
    let user_id = Uuid::new_v4();
    let past = RefreshToken::new(user_id, "digest", Utc::now() - Duration::seconds(1));
    assert!(matches!(past, Err(ValidationError::InvalidFormat { .. })));

    let zero = RefreshToken::with_ttl(user_id, "digest", Duration::zero());
    assert!(zero.is_err());
}

#[test]
fn test_refresh_token_requires_value() {
    let result = RefreshToken::with_ttl(Uuid::new_v4(), "", Duration::days(1));
    assert!(matches!(result, Err(ValidationError::RequiredField { .. })));
}

#[test]
fn test_token_pair_wire_shape() {
    let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 900);
    let json = serde_json::to_value(&pair).unwrap();
    assert_eq!(json, serde_json::json!({
        "access_token": "access",
        "refresh_token": "refresh",
        "expires_in": 900
    }));
}
