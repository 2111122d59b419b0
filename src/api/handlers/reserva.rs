use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateReservaRequest, UpdateReservaRequest},
    responses::DeletedResponse,
};
use crate::domain::models::reserva::NewReserva;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_reserva(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReservaRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.usuario_repo.find_by_id(payload.usuario_id).await?
        .ok_or(AppError::NotFound("Usuario no encontrado".into()))?;

    let created = state.reserva_repo.create_checked(&NewReserva {
        turno_id: payload.turno_id,
        usuario_id: payload.usuario_id,
    }).await
        .inspect_err(|e| warn!("Reserva rejected for turno {} / usuario {}: {}", payload.turno_id, payload.usuario_id, e))?;

    info!("Reserva confirmed: {} (turno {}, usuario {})", created.id, created.turno_id, created.usuario_id);
    Ok(Json(created))
}

pub async fn list_reservas(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let reservas = state.reserva_repo.list().await?;
    Ok(Json(reservas))
}

pub async fn get_reserva(
    State(state): State<Arc<AppState>>,
    Path(reserva_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let reserva = state.reserva_repo.find_by_id(reserva_id).await?
        .ok_or(AppError::NotFound("Reserva no encontrada".into()))?;
    Ok(Json(reserva))
}

/// Moves a reservation to another slot; the target slot must admit it.
pub async fn update_reserva(
    State(state): State<Arc<AppState>>,
    Path(reserva_id): Path<i64>,
    Json(payload): Json<UpdateReservaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reserva = state.reserva_repo.find_by_id(reserva_id).await?
        .ok_or(AppError::NotFound("Reserva no encontrada".into()))?;

    let updated = match payload.turno_id {
        Some(turno_id) if turno_id != reserva.turno_id => {
            let moved = state.reserva_repo.move_checked(&reserva, turno_id).await
                .inspect_err(|e| warn!("Reserva {} could not move to turno {}: {}", reserva.id, turno_id, e))?;
            info!("Reserva {} moved from turno {} to {}", moved.id, reserva.turno_id, moved.turno_id);
            moved
        }
        _ => reserva,
    };

    Ok(Json(updated))
}

pub async fn delete_reserva(
    State(state): State<Arc<AppState>>,
    Path(reserva_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.reserva_repo.delete(reserva_id).await?;
    info!("Reserva deleted: {}", reserva_id);
    Ok(Json(DeletedResponse::new("Reserva eliminada")))
}
