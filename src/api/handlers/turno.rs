use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateTurnoRequest, UpdateTurnoRequest},
    responses::DeletedResponse,
};
use crate::domain::models::turno::NewTurno;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

fn validate_slot_shape(duracion_minutos: i32, capacidad: i32) -> Result<(), AppError> {
    if duracion_minutos < 1 {
        return Err(AppError::BadRequest("La duración debe ser de al menos 1 minuto".into()));
    }
    if capacidad < 1 {
        return Err(AppError::BadRequest("La capacidad debe ser al menos 1".into()));
    }
    Ok(())
}

pub async fn create_turno(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTurnoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let servicio = state.servicio_repo.find_by_id(payload.servicio_id).await?
        .ok_or(AppError::NotFound("Servicio no encontrado".into()))?;

    validate_slot_shape(payload.duracion_minutos, payload.capacidad)?;

    let created = state.turno_repo.create(&NewTurno {
        servicio_id: servicio.id,
        fecha_hora_inicio: payload.fecha_hora_inicio,
        duracion_minutos: payload.duracion_minutos,
        capacidad: payload.capacidad,
        precio: payload.precio,
    }).await?;

    info!("Turno created: {} for servicio {} (capacidad {})", created.id, servicio.id, created.capacidad);
    Ok(Json(created))
}

pub async fn list_turnos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let turnos = state.turno_repo.list().await?;
    Ok(Json(turnos))
}

pub async fn get_turno(
    State(state): State<Arc<AppState>>,
    Path(turno_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let turno = state.turno_repo.find_by_id(turno_id).await?
        .ok_or(AppError::NotFound("Turno no encontrado".into()))?;
    Ok(Json(turno))
}

pub async fn update_turno(
    State(state): State<Arc<AppState>>,
    Path(turno_id): Path<i64>,
    Json(payload): Json<UpdateTurnoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut turno = state.turno_repo.find_by_id(turno_id).await?
        .ok_or(AppError::NotFound("Turno no encontrado".into()))?;

    if let Some(inicio) = payload.fecha_hora_inicio { turno.fecha_hora_inicio = inicio; }
    if let Some(duracion) = payload.duracion_minutos { turno.duracion_minutos = duracion; }
    if let Some(cap) = payload.capacidad { turno.capacidad = cap; }
    if let Some(precio) = payload.precio { turno.precio = precio; }

    validate_slot_shape(turno.duracion_minutos, turno.capacidad)?;

    // The repository refuses a capacity below the reservations already held.
    let updated = state.turno_repo.update(&turno).await
        .inspect_err(|e| warn!("Turno {} update rejected: {}", turno.id, e))?;
    info!("Turno updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_turno(
    State(state): State<Arc<AppState>>,
    Path(turno_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.turno_repo.delete(turno_id).await?;
    info!("Turno deleted: {}", turno_id);
    Ok(Json(DeletedResponse::new("Turno eliminado")))
}
