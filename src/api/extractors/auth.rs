use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use crate::error::AppError;

/// Identity of the caller, placed in request extensions by
/// [`require_bearer_token`](crate::api::middleware::auth::require_bearer_token).
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub usuario_id: i64,
    pub username: String,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
