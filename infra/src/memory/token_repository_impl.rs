//! In-memory implementation of the TokenRepository trait

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::entities::token::RefreshToken;
use blog_core::errors::DomainError;
use blog_core::repositories::TokenRepository;

#[derive(Default)]
struct TokenTable {
    /// Keyed by token digest
    rows: HashMap<String, RefreshToken>,
    by_user: HashMap<Uuid, HashSet<String>>,
}

impl TokenTable {
    fn remove(&mut self, token_hash: &str) -> Option<RefreshToken> {
        let token = self.rows.remove(token_hash)?;
        if let Some(hashes) = self.by_user.get_mut(&token.user_id) {
            hashes.remove(token_hash);
            if hashes.is_empty() {
                self.by_user.remove(&token.user_id);
            }
        }
        Some(token)
    }
}

/// Refresh token store held in process memory
#[derive(Default)]
pub struct InMemoryTokenRepository {
    table: RwLock<TokenTable>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut table = self.table.write().await;
        if table.rows.contains_key(&token.token_hash) {
            return Err(DomainError::store("duplicate refresh token digest"));
        }

        table
            .by_user
            .entry(token.user_id)
            .or_default()
            .insert(token.token_hash.clone());
        table.rows.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self.table.read().await.rows.get(token_hash).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        let table = self.table.read().await;
        let mut tokens: Vec<RefreshToken> = table
            .by_user
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter_map(|hash| table.rows.get(hash).cloned())
            .collect();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tokens)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        let hash = table
            .rows
            .values()
            .find(|t| t.id == id)
            .map(|t| t.token_hash.clone());

        Ok(match hash {
            Some(hash) => table.remove(&hash).is_some(),
            None => false,
        })
    }

    async fn take_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self.table.write().await.remove(token_hash))
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut table = self.table.write().await;
        let hashes = table.by_user.remove(&user_id).unwrap_or_default();
        for hash in &hashes {
            table.rows.remove(hash);
        }
        Ok(hashes.len())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut table = self.table.write().await;
        let expired: Vec<String> = table
            .rows
            .values()
            .filter(|t| t.is_expired_at(now))
            .map(|t| t.token_hash.clone())
            .collect();

        for hash in &expired {
            table.remove(hash);
        }
        Ok(expired.len())
    }

    async fn count_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        Ok(self
            .table
            .read()
            .await
            .by_user
            .get(&user_id)
            .map_or(0, HashSet::len))
    }
}
