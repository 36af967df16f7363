//! In-memory implementation of the UserRepository trait

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::entities::user::User;
use blog_core::errors::{CredentialError, DomainError};
use blog_core::repositories::UserRepository;

/// Usernames compare case-insensitively, like the `utf8mb4_unicode_ci` column
fn username_key(username: &str) -> String {
    username.to_lowercase()
}

#[derive(Default)]
struct UserTable {
    rows: HashMap<Uuid, User>,
    email_index: HashMap<String, Uuid>,
    username_index: HashMap<String, Uuid>,
}

impl UserTable {
    fn check_unique(&self, user: &User) -> Result<(), DomainError> {
        if matches!(self.email_index.get(&user.email), Some(id) if *id != user.id) {
            return Err(CredentialError::EmailAlreadyExists.into());
        }
        if matches!(self.username_index.get(&username_key(&user.username)), Some(id) if *id != user.id) {
            return Err(CredentialError::UsernameAlreadyExists.into());
        }
        Ok(())
    }

    fn insert(&mut self, user: User) {
        self.email_index.insert(user.email.clone(), user.id);
        self.username_index.insert(username_key(&user.username), user.id);
        self.rows.insert(user.id, user);
    }

    fn remove(&mut self, id: Uuid) -> Option<User> {
        let user = self.rows.remove(&id)?;
        self.email_index.remove(&user.email);
        self.username_index.remove(&username_key(&user.username));
        Some(user)
    }
}

/// Credential store held in process memory, with unique email and username indexes
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
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
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .email_index
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .username_index
            .get(&username_key(username))
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        if table.rows.contains_key(&user.id) {
            return Err(DomainError::store(format!("user {} already exists", user.id)));
        }
        table.check_unique(&user)?;

        table.insert(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&user.id) {
            return Err(DomainError::not_found("user"));
        }
        table.check_unique(&user)?;

        table.remove(user.id);
        table.insert(user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.table.write().await.remove(id).is_some())
    }
}
