//! Unit tests for mock user repository implementation

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{CredentialError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(email: &str, username: &str) -> User {
    User::new(email, username, "$2b$04$hash").unwrap()
}

#[tokio::test]
async fn test_create_and_find_user() {
    let repo = MockUserRepository::new();
    let created = repo.create(user("alice@example.com", "alice")).await.unwrap();

    assert_eq!(repo.find_by_id(created.id).await.unwrap().unwrap().email, "alice@example.com");
    assert_eq!(repo.find_by_email("alice@example.com").await.unwrap().unwrap().id, created.id);
    assert_eq!(repo.find_by_username("alice").await.unwrap().unwrap().id, created.id);
    assert!(repo.exists_by_email("alice@example.com").await.unwrap());
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_rejects_duplicates() {
    let repo = MockUserRepository::new();
    repo.create(user("alice@example.com", "alice")).await.unwrap();

    let duplicate_email = repo.create(user("alice@example.com", "alice2")).await;
    assert_eq!(duplicate_email.unwrap_err(), DomainError::Credential(CredentialError::EmailAlreadyExists));

    let duplicate_username = repo.create(user("other@example.com", "alice")).await;
    assert_eq!(duplicate_username.unwrap_err(), DomainError::Credential(CredentialError::UsernameAlreadyExists));

    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_update_and_delete() {
    let repo = MockUserRepository::new();
    let mut alice = repo.create(user("alice@example.com", "alice")).await.unwrap();

    alice.verify_email();
    repo.update(alice.clone()).await.unwrap();
    assert!(repo.find_by_id(alice.id).await.unwrap().unwrap().is_verified);

    assert!(repo.delete(alice.id).await.unwrap());
    assert!(!repo.delete(alice.id).await.unwrap());
    assert!(matches!(repo.update(alice).await, Err(DomainError::NotFound { .. })));
}
