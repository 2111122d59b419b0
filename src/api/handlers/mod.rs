pub mod auth;
pub mod emprendedor;
pub mod health;
pub mod reserva;
pub mod servicio;
pub mod turno;
pub mod usuario;
