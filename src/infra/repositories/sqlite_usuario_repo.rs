use crate::domain::{models::usuario::{NewUsuario, Usuario}, ports::UsuarioRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteUsuarioRepo {
    pool: SqlitePool,
}

impl SqliteUsuarioRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsuarioRepository for SqliteUsuarioRepo {
    async fn create(&self, usuario: &NewUsuario) -> Result<Usuario, AppError> {
        sqlx::query_as::<_, Usuario>(
            "INSERT INTO usuarios (email, username, password, rol) VALUES (?, ?, ?, ?) RETURNING id, email, username, password, rol",
        )
            .bind(&usuario.email)
            .bind(&usuario.username)
            .bind(&usuario.password_hash)
            .bind(usuario.rol.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Usuario>, AppError> {
        sqlx::query_as::<_, Usuario>(
            "SELECT id, email, username, password, rol FROM usuarios WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Usuario>, AppError> {
        sqlx::query_as::<_, Usuario>(
            "SELECT id, email, username, password, rol FROM usuarios WHERE username = ?",
        )
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn exists_with_email_or_username(&self, email: &str, username: &str, exclude_id: i64) -> Result<bool, AppError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM usuarios WHERE (email = ? OR username = ?) AND id != ? LIMIT 1",
        )
            .bind(email)
            .bind(username)
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(found.is_some())
    }

    async fn list(&self) -> Result<Vec<Usuario>, AppError> {
        sqlx::query_as::<_, Usuario>(
            "SELECT id, email, username, password, rol FROM usuarios ORDER BY id ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, usuario: &Usuario) -> Result<Usuario, AppError> {
        sqlx::query_as::<_, Usuario>(
            "UPDATE usuarios SET email = ?, username = ?, rol = ? WHERE id = ? RETURNING id, email, username, password, rol",
        )
            .bind(&usuario.email)
            .bind(&usuario.username)
            .bind(usuario.rol.as_str())
            .bind(usuario.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Usuario no encontrado".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite Usuario Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Usuario no encontrado".into())); }
        Ok(())
    }
}
