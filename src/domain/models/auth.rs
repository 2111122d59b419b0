use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username the token was issued to.
    pub sub: String,
    pub uid: i64,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

/// Server-side registry entry for an issued access token. Only the SHA-256
/// hash of the token is stored.
#[derive(Debug, FromRow, Clone)]
pub struct AccessTokenRecord {
    pub token_hash: String,
    pub usuario_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
