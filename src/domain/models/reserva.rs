use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow, Clone, PartialEq)]
pub struct Reserva {
    pub id: i64,
    pub turno_id: i64,
    pub usuario_id: i64,
}

pub struct NewReserva {
    pub turno_id: i64,
    pub usuario_id: i64,
}

/// A reservation joined with its slot and service, as listed per usuario.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct ReservaDetalle {
    pub reserva_id: i64,
    pub turno_id: i64,
    pub fecha_hora_inicio: NaiveDateTime,
    pub precio: Option<f64>,
    pub servicio_id: i64,
    pub servicio_nombre: String,
    pub emprendedor_id: i64,
}
