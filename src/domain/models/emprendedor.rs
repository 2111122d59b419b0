use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Emprendedor {
    pub id: i64,
    pub usuario_id: i64,
    pub nombre: String,
    pub apellido: String,
    pub negocio: String,
    pub descripcion: Option<String>,
}

pub struct NewEmprendedor {
    pub usuario_id: i64,
    pub nombre: String,
    pub apellido: String,
    pub negocio: String,
    pub descripcion: Option<String>,
}
