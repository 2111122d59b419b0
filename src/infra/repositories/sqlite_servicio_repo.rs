use crate::domain::{models::servicio::{NewServicio, Servicio}, ports::ServicioRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteServicioRepo { pool: SqlitePool }
impl SqliteServicioRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl ServicioRepository for SqliteServicioRepo {
    async fn create(&self, servicio: &NewServicio) -> Result<Servicio, AppError> {
        sqlx::query_as::<_, Servicio>(
            "INSERT INTO servicios (emprendedor_id, nombre, descripcion) VALUES (?, ?, ?) RETURNING id, emprendedor_id, nombre, descripcion"
        )
            .bind(servicio.emprendedor_id)
            .bind(&servicio.nombre)
            .bind(&servicio.descripcion)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Servicio>, AppError> {
        sqlx::query_as::<_, Servicio>("SELECT id, emprendedor_id, nombre, descripcion FROM servicios WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Servicio>, AppError> {
        sqlx::query_as::<_, Servicio>("SELECT id, emprendedor_id, nombre, descripcion FROM servicios ORDER BY id ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_emprendedor(&self, emprendedor_id: i64) -> Result<Vec<Servicio>, AppError> {
        sqlx::query_as::<_, Servicio>("SELECT id, emprendedor_id, nombre, descripcion FROM servicios WHERE emprendedor_id = ? ORDER BY id ASC")
            .bind(emprendedor_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, servicio: &Servicio) -> Result<Servicio, AppError> {
        sqlx::query_as::<_, Servicio>(
            "UPDATE servicios SET nombre = ?, descripcion = ? WHERE id = ? RETURNING id, emprendedor_id, nombre, descripcion"
        )
            .bind(&servicio.nombre)
            .bind(&servicio.descripcion)
            .bind(servicio.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Servicio no encontrado".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM servicios WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Servicio no encontrado".into())); }
        Ok(())
    }
}
