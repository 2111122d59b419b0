use crate::domain::models::{emprendedor::Emprendedor, turno::Turno, usuario::Usuario};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: Usuario,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user_schema: Usuario,
    pub token: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub username: String,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub ok: bool,
    pub mensaje: String,
}

impl DeletedResponse {
    pub fn new(mensaje: &str) -> Self {
        Self { ok: true, mensaje: mensaje.to_string() }
    }
}

#[derive(Serialize)]
pub struct EmprendedorResponse {
    #[serde(flatten)]
    pub emprendedor: Emprendedor,
    pub usuario: Usuario,
}

#[derive(Serialize)]
pub struct TurnoResumen {
    pub id: i64,
    pub fecha_hora_inicio: NaiveDateTime,
    pub capacidad: i32,
    pub precio: Option<f64>,
}

impl From<Turno> for TurnoResumen {
    fn from(turno: Turno) -> Self {
        Self {
            id: turno.id,
            fecha_hora_inicio: turno.fecha_hora_inicio,
            capacidad: turno.capacidad,
            precio: turno.precio,
        }
    }
}

#[derive(Serialize)]
pub struct ServicioConTurnos {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub turnos: Vec<TurnoResumen>,
}
