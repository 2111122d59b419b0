use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Servicio {
    pub id: i64,
    pub emprendedor_id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
}

pub struct NewServicio {
    pub emprendedor_id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
}
