use axum::{
    body::Body,
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, emprendedor, health, reserva, servicio, turno, usuario};
use crate::api::middleware::auth::require_bearer_token;
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/usuarios/registro", post(auth::registro))
        .route("/usuarios/login", post(auth::login))
        .route("/usuarios/perfil", get(auth::perfil))
        .route("/usuarios/logout", post(auth::logout))

        // Usuarios
        .route("/usuarios", post(usuario::create_usuario).get(usuario::list_usuarios))
        .route("/usuarios/{id}", get(usuario::get_usuario).put(usuario::update_usuario).delete(usuario::delete_usuario))
        .route("/usuarios/{id}/reservas", get(usuario::list_reservas_de_usuario))

        // Emprendedores
        .route("/emprendedores", post(emprendedor::create_emprendedor).get(emprendedor::list_emprendedores))
        .route("/emprendedores/{id}", get(emprendedor::get_emprendedor).put(emprendedor::update_emprendedor).delete(emprendedor::delete_emprendedor))
        .route("/emprendedores/{id}/servicios", get(emprendedor::list_servicios_de_emprendedor))

        // Servicios
        .route("/servicios", post(servicio::create_servicio).get(servicio::list_servicios))
        .route("/servicios/{id}", get(servicio::get_servicio).put(servicio::update_servicio).delete(servicio::delete_servicio))

        // Turnos
        .route("/turnos", post(turno::create_turno).get(turno::list_turnos))
        .route("/turnos/{id}", get(turno::get_turno).put(turno::update_turno).delete(turno::delete_turno))

        // Reservas
        .route("/reservas", post(reserva::create_reserva).get(reserva::list_reservas))
        .route("/reservas/{id}", get(reserva::get_reserva).put(reserva::update_reserva).delete(reserva::delete_reserva))

        .layer(middleware::from_fn_with_state(state.clone(), require_bearer_token))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        usuario_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
