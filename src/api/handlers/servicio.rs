use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateServicioRequest, UpdateServicioRequest},
    responses::DeletedResponse,
};
use crate::domain::models::servicio::NewServicio;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_servicio(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateServicioRequest>,
) -> Result<impl IntoResponse, AppError> {
    let emprendedor = state.emprendedor_repo.find_by_id(payload.emprendedor_id).await?
        .ok_or(AppError::NotFound("Emprendedor no encontrado".into()))?;

    let created = state.servicio_repo.create(&NewServicio {
        emprendedor_id: emprendedor.id,
        nombre: payload.nombre,
        descripcion: payload.descripcion,
    }).await?;

    info!("Servicio created: {} for emprendedor {}", created.id, emprendedor.id);
    Ok(Json(created))
}

pub async fn list_servicios(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let servicios = state.servicio_repo.list().await?;
    Ok(Json(servicios))
}

pub async fn get_servicio(
    State(state): State<Arc<AppState>>,
    Path(servicio_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let servicio = state.servicio_repo.find_by_id(servicio_id).await?
        .ok_or(AppError::NotFound("Servicio no encontrado".into()))?;
    Ok(Json(servicio))
}

pub async fn update_servicio(
    State(state): State<Arc<AppState>>,
    Path(servicio_id): Path<i64>,
    Json(payload): Json<UpdateServicioRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut servicio = state.servicio_repo.find_by_id(servicio_id).await?
        .ok_or(AppError::NotFound("Servicio no encontrado".into()))?;

    if let Some(nombre) = payload.nombre { servicio.nombre = nombre; }
    if let Some(descripcion) = payload.descripcion {
        servicio.descripcion = if descripcion.is_empty() { None } else { Some(descripcion) };
    }

    let updated = state.servicio_repo.update(&servicio).await?;
    info!("Servicio updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_servicio(
    State(state): State<Arc<AppState>>,
    Path(servicio_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.servicio_repo.delete(servicio_id).await?;
    info!("Servicio deleted: {}", servicio_id);
    Ok(Json(DeletedResponse::new("Servicio eliminado")))
}
