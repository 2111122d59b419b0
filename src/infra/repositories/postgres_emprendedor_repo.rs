use crate::domain::{models::emprendedor::{Emprendedor, NewEmprendedor}, ports::EmprendedorRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEmprendedorRepo {
    pool: PgPool,
}

impl PostgresEmprendedorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmprendedorRepository for PostgresEmprendedorRepo {
    async fn create(&self, emprendedor: &NewEmprendedor) -> Result<Emprendedor, AppError> {
        sqlx::query_as::<_, Emprendedor>(
            "INSERT INTO emprendedores (usuario_id, nombre, apellido, negocio, descripcion) VALUES ($1, $2, $3, $4, $5)
             RETURNING id, usuario_id, nombre, apellido, negocio, descripcion"
        )
            .bind(emprendedor.usuario_id)
            .bind(&emprendedor.nombre)
            .bind(&emprendedor.apellido)
            .bind(&emprendedor.negocio)
            .bind(&emprendedor.descripcion)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Emprendedor>, AppError> {
        sqlx::query_as::<_, Emprendedor>("SELECT id, usuario_id, nombre, apellido, negocio, descripcion FROM emprendedores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_usuario(&self, usuario_id: i64) -> Result<Option<Emprendedor>, AppError> {
        sqlx::query_as::<_, Emprendedor>("SELECT id, usuario_id, nombre, apellido, negocio, descripcion FROM emprendedores WHERE usuario_id = $1")
            .bind(usuario_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Emprendedor>, AppError> {
        sqlx::query_as::<_, Emprendedor>("SELECT id, usuario_id, nombre, apellido, negocio, descripcion FROM emprendedores ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, emprendedor: &Emprendedor) -> Result<Emprendedor, AppError> {
        sqlx::query_as::<_, Emprendedor>(
            "UPDATE emprendedores SET nombre = $1, apellido = $2, negocio = $3, descripcion = $4 WHERE id = $5
             RETURNING id, usuario_id, nombre, apellido, negocio, descripcion"
        )
            .bind(&emprendedor.nombre)
            .bind(&emprendedor.apellido)
            .bind(&emprendedor.negocio)
            .bind(&emprendedor.descripcion)
            .bind(emprendedor.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Emprendedor no encontrado".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM emprendedores WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Emprendedor no encontrado".into())); }
        Ok(())
    }
}
