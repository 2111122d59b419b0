use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{
    requests::{CreateUsuarioRequest, LoginRequest},
    responses::{LoginResponse, ProfileResponse, RegisterResponse},
};
use crate::api::extractors::auth::AuthUser;
use crate::api::handlers::usuario::register_usuario;
use crate::domain::services::auth_service::verify_password;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn registro(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUsuarioRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = register_usuario(&state, payload).await?;
    Ok(Json(RegisterResponse { message: created }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = state.usuario_repo.find_by_username(&payload.username).await?
        .ok_or_else(|| {
            warn!("Login attempt for unknown username {}", payload.username);
            AppError::InvalidCredentials
        })?;

    verify_password(&payload.password, &usuario.password)
        .inspect_err(|_| warn!("Wrong password for usuario {}", usuario.id))?;

    let token = state.auth_service.issue_token(&usuario).await?;

    info!("Usuario logged in: {}", usuario.id);

    Ok(Json(LoginResponse {
        user_schema: usuario,
        token,
    }))
}

pub async fn perfil(user: AuthUser) -> impl IntoResponse {
    Json(ProfileResponse { username: user.username })
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    state.auth_service.revoke(&user.token).await?;

    info!("Usuario logged out: {}", user.usuario_id);

    Ok(Json(serde_json::json!({"message": "Logged out"})))
}
