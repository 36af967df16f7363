//! MySQL implementation of the TokenRepository trait.
//!
//! Rows are keyed by the SHA-256 digest of the bearer string. Redemption
//! deletes the row inside a transaction that first locks it, so two
//! concurrent takes of the same digest cannot both see it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use blog_core::domain::entities::token::RefreshToken;
use blog_core::errors::DomainError;
use blog_core::repositories::TokenRepository;

use super::{column_error, store_error};

const TOKEN_COLUMNS: &str = "id, user_id, token_hash, expires_at, created_at";

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let user_id: String = row.try_get("user_id").map_err(|e| column_error("user_id", e))?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid token UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| column_error("token_hash", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(token.expires_at)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to save refresh token", e))?;

        Ok(token)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE token_hash = ? LIMIT 1",
            TOKEN_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find refresh token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE user_id = ? ORDER BY created_at DESC",
            TOKEN_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find user tokens", e))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn take_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE token_hash = ? LIMIT 1 FOR UPDATE",
            TOKEN_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(token_hash)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to lock refresh token", e))?;

        // Dropping the transaction rolls it back
        let Some(row) = row else {
            return Ok(None);
        };
        let token = Self::row_to_token(&row)?;

        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = ?")
            .bind(token.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to delete refresh token", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit token redemption", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(token))
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete user tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete expired tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn count_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to count user tokens", e))?;

        let count: i64 = row.try_get("count").map_err(|e| column_error("count", e))?;
        Ok(count as usize)
    }
}
