use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Turno {
    pub id: i64,
    pub servicio_id: i64,
    pub fecha_hora_inicio: NaiveDateTime,
    pub duracion_minutos: i32,
    pub capacidad: i32,
    pub precio: Option<f64>,
}

pub struct NewTurno {
    pub servicio_id: i64,
    pub fecha_hora_inicio: NaiveDateTime,
    pub duracion_minutos: i32,
    pub capacidad: i32,
    pub precio: Option<f64>,
}
