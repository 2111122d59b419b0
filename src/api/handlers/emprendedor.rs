use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateEmprendedorRequest, UpdateEmprendedorRequest},
    responses::{DeletedResponse, EmprendedorResponse, ServicioConTurnos},
};
use crate::domain::models::{emprendedor::{Emprendedor, NewEmprendedor}, usuario::Rol};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

async fn with_usuario(state: &AppState, emprendedor: Emprendedor) -> Result<EmprendedorResponse, AppError> {
    let usuario = state.usuario_repo.find_by_id(emprendedor.usuario_id).await?
        .ok_or(AppError::NotFound("Usuario no encontrado".into()))?;
    Ok(EmprendedorResponse { emprendedor, usuario })
}

pub async fn create_emprendedor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEmprendedorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = state.usuario_repo.find_by_id(payload.usuario_id).await?
        .ok_or(AppError::NotFound("Usuario no encontrado".into()))?;

    if usuario.rol != Rol::Emprendedor {
        warn!("Usuario {} has rol {}, cannot own an emprendedor profile", usuario.id, usuario.rol);
        return Err(AppError::BadRequest("El usuario no es un emprendedor".into()));
    }

    if state.emprendedor_repo.find_by_usuario(usuario.id).await?.is_some() {
        return Err(AppError::BadRequest("El usuario ya tiene un emprendedor".into()));
    }

    let created = state.emprendedor_repo.create(&NewEmprendedor {
        usuario_id: usuario.id,
        nombre: payload.nombre,
        apellido: payload.apellido,
        negocio: payload.negocio,
        descripcion: payload.descripcion,
    }).await?;

    info!("Emprendedor created: {} for usuario {}", created.id, usuario.id);
    Ok(Json(EmprendedorResponse { emprendedor: created, usuario }))
}

pub async fn list_emprendedores(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let emprendedores = state.emprendedor_repo.list().await?;

    let mut response = Vec::with_capacity(emprendedores.len());
    for emprendedor in emprendedores {
        response.push(with_usuario(&state, emprendedor).await?);
    }
    Ok(Json(response))
}

pub async fn get_emprendedor(
    State(state): State<Arc<AppState>>,
    Path(emprendedor_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let emprendedor = state.emprendedor_repo.find_by_id(emprendedor_id).await?
        .ok_or(AppError::NotFound("Emprendedor no encontrado".into()))?;
    Ok(Json(with_usuario(&state, emprendedor).await?))
}

pub async fn update_emprendedor(
    State(state): State<Arc<AppState>>,
    Path(emprendedor_id): Path<i64>,
    Json(payload): Json<UpdateEmprendedorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut emprendedor = state.emprendedor_repo.find_by_id(emprendedor_id).await?
        .ok_or(AppError::NotFound("Emprendedor no encontrado".into()))?;

    if let Some(nombre) = payload.nombre { emprendedor.nombre = nombre; }
    if let Some(apellido) = payload.apellido { emprendedor.apellido = apellido; }
    if let Some(negocio) = payload.negocio { emprendedor.negocio = negocio; }
    if let Some(descripcion) = payload.descripcion {
        emprendedor.descripcion = if descripcion.is_empty() { None } else { Some(descripcion) };
    }

    let updated = state.emprendedor_repo.update(&emprendedor).await?;
    info!("Emprendedor updated: {}", updated.id);
    Ok(Json(with_usuario(&state, updated).await?))
}

pub async fn delete_emprendedor(
    State(state): State<Arc<AppState>>,
    Path(emprendedor_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.emprendedor_repo.delete(emprendedor_id).await?;
    info!("Emprendedor deleted: {}", emprendedor_id);
    Ok(Json(DeletedResponse::new("Emprendedor eliminado")))
}

/// Services of a provider, each with its slots.
pub async fn list_servicios_de_emprendedor(
    State(state): State<Arc<AppState>>,
    Path(emprendedor_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let emprendedor = state.emprendedor_repo.find_by_id(emprendedor_id).await?
        .ok_or(AppError::NotFound("Emprendedor no encontrado".into()))?;

    let usuario = state.usuario_repo.find_by_id(emprendedor.usuario_id).await?;
    if !matches!(usuario, Some(ref u) if u.rol == Rol::Emprendedor) {
        return Err(AppError::NotFound("Emprendedor no encontrado".into()));
    }

    let servicios = state.servicio_repo.list_by_emprendedor(emprendedor.id).await?;

    let mut response = Vec::with_capacity(servicios.len());
    for servicio in servicios {
        let turnos = state.turno_repo.list_by_servicio(servicio.id).await?;
        response.push(ServicioConTurnos {
            id: servicio.id,
            nombre: servicio.nombre,
            descripcion: servicio.descripcion,
            turnos: turnos.into_iter().map(Into::into).collect(),
        });
    }
    Ok(Json(response))
}
