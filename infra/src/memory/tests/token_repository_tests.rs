//! Tests for the in-memory refresh token store

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use blog_core::domain::entities::token::RefreshToken;
use blog_core::repositories::TokenRepository;
use blog_core::services::token::hash_token;

use crate::memory::InMemoryTokenRepository;

fn token(user_id: Uuid, value: &str) -> RefreshToken {
    RefreshToken::with_ttl(user_id, hash_token(value), Duration::days(7)).unwrap()
}

#[tokio::test]
async fn test_save_and_find() {
    let repo = InMemoryTokenRepository::new();
    let user_id = Uuid::new_v4();
    let saved = repo.save_refresh_token(token(user_id, "first")).await.unwrap();

    let found = repo.find_by_token_hash(&hash_token("first")).await.unwrap().unwrap();
    assert_eq!(found, saved);
    assert!(repo.find_by_token_hash(&hash_token("other")).await.unwrap().is_none());
    assert_eq!(repo.count_user_tokens(user_id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_digest_rejected() {
    let repo = InMemoryTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.save_refresh_token(token(user_id, "same")).await.unwrap();

    assert!(repo.save_refresh_token(token(user_id, "same")).await.is_err());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_take_removes_exactly_once() {
    let repo = InMemoryTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.save_refresh_token(token(user_id, "once")).await.unwrap();

    let hash = hash_token("once");
    assert!(repo.take_by_token_hash(&hash).await.unwrap().is_some());
    assert!(repo.take_by_token_hash(&hash).await.unwrap().is_none());
    assert_eq!(repo.count_user_tokens(user_id).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_take_has_single_winner() {
    let repo = Arc::new(InMemoryTokenRepository::new());
    repo.save_refresh_token(token(Uuid::new_v4(), "contested"))
        .await
        .unwrap();

    let hash = hash_token("contested");
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repo = repo.clone();
            let hash = hash.clone();
            tokio::spawn(async move { repo.take_by_token_hash(&hash).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_delete_by_user_only_touches_that_user() {
    let repo = InMemoryTokenRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    repo.save_refresh_token(token(alice, "a1")).await.unwrap();
    repo.save_refresh_token(token(alice, "a2")).await.unwrap();
    repo.save_refresh_token(token(bob, "b1")).await.unwrap();

    assert_eq!(repo.delete_by_user_id(alice).await.unwrap(), 2);
    assert_eq!(repo.delete_by_user_id(alice).await.unwrap(), 0);
    assert!(repo.find_by_user_id(alice).await.unwrap().is_empty());
    assert_eq!(repo.find_by_user_id(bob).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_by_record_id() {
    let repo = InMemoryTokenRepository::new();
    let saved = repo.save_refresh_token(token(Uuid::new_v4(), "by-id")).await.unwrap();

    assert!(repo.delete(saved.id).await.unwrap());
    assert!(!repo.delete(saved.id).await.unwrap());
    assert!(repo.find_by_token_hash(&saved.token_hash).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_expired_keeps_live_tokens() {
    let repo = InMemoryTokenRepository::new();
    let user_id = Uuid::new_v4();
    let live = repo.save_refresh_token(token(user_id, "live")).await.unwrap();

    // Records are validated on construction, so age one after the fact
    let mut stale = token(user_id, "stale");
    stale.expires_at = Utc::now() - Duration::minutes(1);
    repo.save_refresh_token(stale).await.unwrap();

    assert_eq!(repo.delete_expired(Utc::now()).await.unwrap(), 1);
    let remaining = repo.find_by_user_id(user_id).await.unwrap();
    assert_eq!(remaining, vec![live]);
}
