use crate::domain::{
    models::turno::{NewTurno, Turno},
    ports::TurnoRepository,
    services::booking::{check_capacity_change, BookingRejection},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTurnoRepo {
    pool: SqlitePool,
}

impl SqliteTurnoRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TurnoRepository for SqliteTurnoRepo {
    async fn create(&self, turno: &NewTurno) -> Result<Turno, AppError> {
        sqlx::query_as::<_, Turno>(
            "INSERT INTO turnos (servicio_id, fecha_hora_inicio, duracion_minutos, capacidad, precio) VALUES (?, ?, ?, ?, ?)
             RETURNING id, servicio_id, fecha_hora_inicio, duracion_minutos, capacidad, precio"
        )
            .bind(turno.servicio_id).bind(turno.fecha_hora_inicio).bind(turno.duracion_minutos)
            .bind(turno.capacidad).bind(turno.precio)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Turno>, AppError> {
        sqlx::query_as::<_, Turno>("SELECT id, servicio_id, fecha_hora_inicio, duracion_minutos, capacidad, precio FROM turnos WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Turno>, AppError> {
        sqlx::query_as::<_, Turno>("SELECT id, servicio_id, fecha_hora_inicio, duracion_minutos, capacidad, precio FROM turnos ORDER BY id ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_servicio(&self, servicio_id: i64) -> Result<Vec<Turno>, AppError> {
        sqlx::query_as::<_, Turno>(
            "SELECT id, servicio_id, fecha_hora_inicio, duracion_minutos, capacidad, precio FROM turnos WHERE servicio_id = ? ORDER BY fecha_hora_inicio ASC"
        )
            .bind(servicio_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, turno: &Turno) -> Result<Turno, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM turnos WHERE id = ?")
            .bind(turno.id).fetch_optional(&mut *tx).await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Turno no encontrado".into()));
        }

        let reservas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservas WHERE turno_id = ?")
            .bind(turno.id).fetch_one(&mut *tx).await?;
        check_capacity_change(turno.capacidad, reservas)?;

        let updated = sqlx::query_as::<_, Turno>(
            "UPDATE turnos SET fecha_hora_inicio = ?, duracion_minutos = ?, capacidad = ?, precio = ?
             WHERE id = ? AND (SELECT COUNT(*) FROM reservas WHERE turno_id = ?) <= ?
             RETURNING id, servicio_id, fecha_hora_inicio, duracion_minutos, capacidad, precio"
        )
            .bind(turno.fecha_hora_inicio).bind(turno.duracion_minutos).bind(turno.capacidad).bind(turno.precio)
            .bind(turno.id).bind(turno.id).bind(turno.capacidad)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or(BookingRejection::CapacityBelowReservas { capacidad: turno.capacidad, reservas })?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM turnos WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Turno no encontrado".into())); }
        Ok(())
    }
}
