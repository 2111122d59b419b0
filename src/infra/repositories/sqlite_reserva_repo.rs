use crate::domain::{
    models::reserva::{NewReserva, Reserva, ReservaDetalle},
    ports::ReservaRepository,
    services::booking::{check_admission, BookingRejection, SlotOccupancy},
};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

pub struct SqliteReservaRepo {
    pool: SqlitePool,
}

impl SqliteReservaRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn load_occupancy(conn: &mut SqliteConnection, turno_id: i64, usuario_id: i64) -> Result<Option<SlotOccupancy>, AppError> {
    let capacidad: Option<i32> = sqlx::query_scalar("SELECT capacidad FROM turnos WHERE id = ?")
        .bind(turno_id)
        .fetch_optional(&mut *conn)
        .await?;

    let Some(capacidad) = capacidad else { return Ok(None) };

    let reservas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservas WHERE turno_id = ?")
        .bind(turno_id)
        .fetch_one(&mut *conn)
        .await?;

    let mine: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservas WHERE turno_id = ? AND usuario_id = ?")
        .bind(turno_id)
        .bind(usuario_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(Some(SlotOccupancy { capacidad, reservas, already_booked: mine > 0 }))
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        BookingRejection::DuplicateBooking.into()
    } else {
        AppError::Database(e)
    }
}

#[async_trait]
impl ReservaRepository for SqliteReservaRepo {
    async fn create_checked(&self, reserva: &NewReserva) -> Result<Reserva, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        check_admission(load_occupancy(&mut tx, reserva.turno_id, reserva.usuario_id).await?)?;

        // The capacity guard is repeated inside the statement so a writer that
        // slipped in after the count above cannot push the slot over capacity.
        let created = sqlx::query_as::<_, Reserva>(
            "INSERT INTO reservas (turno_id, usuario_id)
             SELECT ?, ? WHERE (SELECT COUNT(*) FROM reservas WHERE turno_id = ?) < (SELECT capacidad FROM turnos WHERE id = ?)
             RETURNING id, turno_id, usuario_id"
        )
            .bind(reserva.turno_id).bind(reserva.usuario_id)
            .bind(reserva.turno_id).bind(reserva.turno_id)
            .fetch_optional(&mut *tx).await.map_err(map_write_error)?
            .ok_or(BookingRejection::CapacityExceeded)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn move_checked(&self, reserva: &Reserva, turno_id: i64) -> Result<Reserva, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        check_admission(load_occupancy(&mut tx, turno_id, reserva.usuario_id).await?)?;

        let moved = sqlx::query_as::<_, Reserva>(
            "UPDATE reservas SET turno_id = ?
             WHERE id = ? AND (SELECT COUNT(*) FROM reservas WHERE turno_id = ?) < (SELECT capacidad FROM turnos WHERE id = ?)
             RETURNING id, turno_id, usuario_id"
        )
            .bind(turno_id).bind(reserva.id)
            .bind(turno_id).bind(turno_id)
            .fetch_optional(&mut *tx).await.map_err(map_write_error)?
            .ok_or(BookingRejection::CapacityExceeded)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(moved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reserva>, AppError> {
        sqlx::query_as::<_, Reserva>("SELECT id, turno_id, usuario_id FROM reservas WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Reserva>, AppError> {
        sqlx::query_as::<_, Reserva>("SELECT id, turno_id, usuario_id FROM reservas ORDER BY id ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_detalle_by_usuario(&self, usuario_id: i64) -> Result<Vec<ReservaDetalle>, AppError> {
        sqlx::query_as::<_, ReservaDetalle>(
            "SELECT r.id AS reserva_id, t.id AS turno_id, t.fecha_hora_inicio, t.precio,
                    s.id AS servicio_id, s.nombre AS servicio_nombre, s.emprendedor_id
             FROM reservas r
             JOIN turnos t ON t.id = r.turno_id
             JOIN servicios s ON s.id = t.servicio_id
             WHERE r.usuario_id = ?
             ORDER BY t.fecha_hora_inicio ASC, r.id ASC"
        )
            .bind(usuario_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reservas WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Reserva no encontrada".into())); }
        Ok(())
    }
}
