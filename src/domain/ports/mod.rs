use crate::domain::models::{
    usuario::{NewUsuario, Usuario}, emprendedor::{Emprendedor, NewEmprendedor},
    servicio::{NewServicio, Servicio}, turno::{NewTurno, Turno},
    reserva::{NewReserva, Reserva, ReservaDetalle}, auth::AccessTokenRecord
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    async fn create(&self, usuario: &NewUsuario) -> Result<Usuario, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Usuario>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Usuario>, AppError>;
    /// Whether another usuario (other than `exclude_id`) already uses the email or username.
    async fn exists_with_email_or_username(&self, email: &str, username: &str, exclude_id: i64) -> Result<bool, AppError>;
    async fn list(&self) -> Result<Vec<Usuario>, AppError>;
    async fn update(&self, usuario: &Usuario) -> Result<Usuario, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmprendedorRepository: Send + Sync {
    async fn create(&self, emprendedor: &NewEmprendedor) -> Result<Emprendedor, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Emprendedor>, AppError>;
    async fn find_by_usuario(&self, usuario_id: i64) -> Result<Option<Emprendedor>, AppError>;
    async fn list(&self) -> Result<Vec<Emprendedor>, AppError>;
    async fn update(&self, emprendedor: &Emprendedor) -> Result<Emprendedor, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ServicioRepository: Send + Sync {
    async fn create(&self, servicio: &NewServicio) -> Result<Servicio, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Servicio>, AppError>;
    async fn list(&self) -> Result<Vec<Servicio>, AppError>;
    async fn list_by_emprendedor(&self, emprendedor_id: i64) -> Result<Vec<Servicio>, AppError>;
    async fn update(&self, servicio: &Servicio) -> Result<Servicio, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait TurnoRepository: Send + Sync {
    async fn create(&self, turno: &NewTurno) -> Result<Turno, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Turno>, AppError>;
    async fn list(&self) -> Result<Vec<Turno>, AppError>;
    async fn list_by_servicio(&self, servicio_id: i64) -> Result<Vec<Turno>, AppError>;
    /// Fails with `BadRequest` when the new capacity is below the slot's reservations.
    async fn update(&self, turno: &Turno) -> Result<Turno, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservaRepository: Send + Sync {
    /// Runs the admission check and the insert in one transaction.
    async fn create_checked(&self, reserva: &NewReserva) -> Result<Reserva, AppError>;
    /// Moves a reservation to another slot, admitting it there first.
    async fn move_checked(&self, reserva: &Reserva, turno_id: i64) -> Result<Reserva, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Reserva>, AppError>;
    async fn list(&self) -> Result<Vec<Reserva>, AppError>;
    async fn list_detalle_by_usuario(&self, usuario_id: i64) -> Result<Vec<ReservaDetalle>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn create_token(&self, record: &AccessTokenRecord) -> Result<(), AppError>;
    async fn find_token(&self, token_hash: &str) -> Result<Option<AccessTokenRecord>, AppError>;
    async fn delete_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<(), AppError>;
}
