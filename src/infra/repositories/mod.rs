pub mod sqlite_usuario_repo;
pub mod sqlite_emprendedor_repo;
pub mod sqlite_servicio_repo;
pub mod sqlite_turno_repo;
pub mod sqlite_reserva_repo;
pub mod sqlite_token_repo;

pub mod postgres_usuario_repo;
pub mod postgres_emprendedor_repo;
pub mod postgres_servicio_repo;
pub mod postgres_turno_repo;
pub mod postgres_reserva_repo;
pub mod postgres_token_repo;
