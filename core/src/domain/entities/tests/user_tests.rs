//! Unit tests for the user entity

use crate::domain::entities::user::{User, UserRole};
use crate::errors::ValidationError;

#[test]
fn test_new_user_defaults() {
    let user = User::new("alice@example.com", "alice", "$2b$04$hash").unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, UserRole::Standard);
    assert!(!user.is_verified);
    assert_eq!(user.created_at, user.updated_at);
}

#[test]
fn test_new_user_rejects_empty_fields() {
    assert!(matches!(
        User::new("", "alice", "hash"),
        Err(ValidationError::RequiredField { field }) if field == "email"
    ));
    assert!(matches!(
        User::new("alice@example.com", "  ", "hash"),
        Err(ValidationError::RequiredField { field }) if field == "username"
    ));
    assert!(matches!(
        User::new("alice@example.com", "alice", ""),
        Err(ValidationError::RequiredField { field }) if field == "password"
    ));
}

#[test]
fn test_change_password() {
    let mut user = User::new("alice@example.com", "alice", "old").unwrap();
    user.change_password("new").unwrap();
    assert_eq!(user.password_hash, "new");
    assert!(user.updated_at >= user.created_at);

    assert!(user.change_password("").is_err());
    assert_eq!(user.password_hash, "new");
}

#[test]
fn test_verify_and_promote() {
    let mut user = User::new("alice@example.com", "alice", "hash").unwrap();
    user.verify_email();
    assert!(user.is_verified);

    user.promote_to_admin();
    assert!(user.is_admin());
}

#[test]
fn test_role_wire_names() {
    assert_eq!(serde_json::to_string(&UserRole::Standard).unwrap(), "\"user\"");
    assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    assert_eq!(serde_json::to_string(&UserRole::Author).unwrap(), "\"author\"");
    assert_eq!("author".parse::<UserRole>().unwrap(), UserRole::Author);
    assert!("superuser".parse::<UserRole>().is_err());
}

#[test]
fn test_password_hash_not_serialized() {
    let user = User::new("alice@example.com", "alice", "secret-hash").unwrap();
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "user");
}
