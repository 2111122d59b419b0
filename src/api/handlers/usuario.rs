use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateUsuarioRequest, UpdateUsuarioRequest},
    responses::DeletedResponse,
};
use crate::domain::models::usuario::{NewUsuario, Usuario};
use crate::domain::services::auth_service::hash_password;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn validate_email(email: &str) -> Result<(), AppError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::BadRequest("Email inválido".into())),
    }
}

/// Shared by `/usuarios/registro` and `POST /usuarios`.
pub async fn register_usuario(state: &AppState, payload: CreateUsuarioRequest) -> Result<Usuario, AppError> {
    validate_email(&payload.email)?;
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest("Username y password son obligatorios".into()));
    }

    if state.usuario_repo.exists_with_email_or_username(&payload.email, &payload.username, 0).await? {
        return Err(AppError::BadRequest("Usuario o email ya existe".into()));
    }

    let password_hash = hash_password(&payload.password)?;

    let created = state.usuario_repo.create(&NewUsuario {
        email: payload.email,
        username: payload.username,
        password_hash,
        rol: payload.rol,
    }).await?;

    info!("Usuario created: {} ({})", created.id, created.rol);
    Ok(created)
}

pub async fn create_usuario(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUsuarioRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = register_usuario(&state, payload).await?;
    Ok(Json(created))
}

pub async fn list_usuarios(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let usuarios = state.usuario_repo.list().await?;
    Ok(Json(usuarios))
}

pub async fn get_usuario(
    State(state): State<Arc<AppState>>,
    Path(usuario_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = state.usuario_repo.find_by_id(usuario_id).await?
        .ok_or(AppError::NotFound("Usuario no encontrado".into()))?;
    Ok(Json(usuario))
}

pub async fn update_usuario(
    State(state): State<Arc<AppState>>,
    Path(usuario_id): Path<i64>,
    Json(payload): Json<UpdateUsuarioRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut usuario = state.usuario_repo.find_by_id(usuario_id).await?
        .ok_or(AppError::NotFound("Usuario no encontrado".into()))?;

    if let Some(email) = payload.email {
        validate_email(&email)?;
        usuario.email = email;
    }
    if let Some(username) = payload.username {
        if username.trim().is_empty() {
            return Err(AppError::BadRequest("Username no puede estar vacío".into()));
        }
        usuario.username = username;
    }
    if let Some(rol) = payload.rol {
        usuario.rol = rol;
    }

    if state.usuario_repo.exists_with_email_or_username(&usuario.email, &usuario.username, usuario.id).await? {
        return Err(AppError::BadRequest("Usuario o email ya existe".into()));
    }

    let updated = state.usuario_repo.update(&usuario).await?;
    info!("Usuario updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_usuario(
    State(state): State<Arc<AppState>>,
    Path(usuario_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.usuario_repo.delete(usuario_id).await?;
    info!("Usuario deleted: {}", usuario_id);
    Ok(Json(DeletedResponse::new("Usuario eliminado")))
}

pub async fn list_reservas_de_usuario(
    State(state): State<Arc<AppState>>,
    Path(usuario_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.usuario_repo.find_by_id(usuario_id).await?
        .ok_or(AppError::NotFound("Usuario no encontrado".into()))?;

    let reservas = state.reserva_repo.list_detalle_by_usuario(usuario_id).await?;
    Ok(Json(reservas))
}
