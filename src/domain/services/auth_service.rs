use std::sync::Arc;
use crate::domain::{
    models::{auth::{AccessTokenRecord, Claims}, usuario::Usuario},
    ports::TokenRepository
};
use crate::error::AppError;
use crate::config::Config;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use uuid::Uuid;
use chrono::{Utc, Duration};
use sha2::{Sha256, Digest};
use tracing::{debug, warn};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalWithMsg(format!("password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

pub struct AuthService {
    repo: Arc<dyn TokenRepository>,
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(repo: Arc<dyn TokenRepository>, config: Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Self { repo, config, encoding_key, decoding_key }
    }

    /// Issue a bearer token for the usuario and register it server-side.
    pub async fn issue_token(&self, usuario: &Usuario) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.config.token_ttl_seconds);

        let claims = Claims {
            sub: usuario.username.clone(),
            uid: usuario.id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        self.repo.delete_expired(now).await?;
        self.repo.create_token(&AccessTokenRecord {
            token_hash: self.hash_token(&token),
            usuario_id: usuario.id,
            username: usuario.username.clone(),
            expires_at,
            created_at: now,
        }).await?;

        Ok(token)
    }

    /// Verify signature and expiry, then require the token to still be registered.
    pub async fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                debug!("Rejected bearer token: {}", e);
                AppError::Unauthorized
            })?;

        let record = self.repo.find_token(&self.hash_token(token)).await?;
        match record {
            Some(record) if record.expires_at > Utc::now() => Ok(token_data.claims),
            Some(_) => Err(AppError::Unauthorized),
            None => {
                warn!("Bearer token for {} is not registered (revoked?)", token_data.claims.sub);
                Err(AppError::Unauthorized)
            }
        }
    }

    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        self.repo.delete_token(&self.hash_token(token)).await
    }

    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
