use crate::domain::{models::auth::AccessTokenRecord, ports::TokenRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteTokenRepo { pool: SqlitePool }
impl SqliteTokenRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl TokenRepository for SqliteTokenRepo {
    async fn create_token(&self, record: &AccessTokenRecord) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO access_tokens (token_hash, usuario_id, username, expires_at, created_at) VALUES (?, ?, ?, ?, ?)"
        )
            .bind(&record.token_hash)
            .bind(record.usuario_id)
            .bind(&record.username)
            .bind(record.expires_at)
            .bind(record.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_token(&self, token_hash: &str) -> Result<Option<AccessTokenRecord>, AppError> {
        sqlx::query_as::<_, AccessTokenRecord>(
            "SELECT token_hash, usuario_id, username, expires_at, created_at
             FROM access_tokens WHERE token_hash = ?"
        )
            .bind(token_hash)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_token(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM access_tokens WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("DELETE FROM access_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
