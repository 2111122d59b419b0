use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::{warn, Span};

/// Paths reachable without a bearer token.
pub const PUBLIC_PATHS: [&str; 3] = ["/health", "/usuarios/registro", "/usuarios/login"];

pub async fn require_bearer_token(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_owned();

    if PUBLIC_PATHS.contains(&path.as_str()) || req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let token = req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            warn!(path = %path, "missing or malformed Authorization header");
            AppError::Unauthorized
        })?;

    let claims = state.auth_service.authenticate(&token).await?;

    Span::current().record("usuario_id", claims.uid);

    req.extensions_mut().insert(AuthUser {
        usuario_id: claims.uid,
        username: claims.sub,
        token,
    });

    Ok(next.run(req).await)
}
