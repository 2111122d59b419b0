use turnos_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::{run_sqlite_migrations, sqlite_state},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "s3cret-pass";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await;

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "integration-test-secret".to_string(),
            token_ttl_seconds: 3600,
            log_dir: "logs".to_string(),
        };

        let state = Arc::new(sqlite_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Sends a request, attaching a JSON body and a bearer token when given.
    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    /// Registers a usuario through the public endpoint and returns its id.
    pub async fn register(&self, username: &str, rol: &str) -> i64 {
        let response = self.send("POST", "/usuarios/registro", None, Some(json!({
            "email": format!("{}@example.com", username),
            "username": username,
            "password": PASSWORD,
            "rol": rol
        }))).await;

        if !response.status().is_success() {
            panic!("Registration failed in test helper: status {}", response.status());
        }

        parse_body(response).await["message"]["id"].as_i64().expect("No id in registration body")
    }

    pub async fn login(&self, username: &str) -> String {
        let response = self.send("POST", "/usuarios/login", None, Some(json!({
            "username": username,
            "password": PASSWORD
        }))).await;

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        parse_body(response).await["token"].as_str().expect("No token in login body").to_string()
    }

    /// Registers and logs in a usuario, returning `(id, token)`.
    pub async fn signed_in(&self, username: &str, rol: &str) -> (i64, String) {
        let id = self.register(username, rol).await;
        let token = self.login(username).await;
        (id, token)
    }

    /// Creates an emprendedor profile, a servicio and one turno; returns the ids.
    pub async fn seed_turno(&self, token: &str, owner: &str, capacidad: i32) -> (i64, i64, i64) {
        let usuario_id = self.register(owner, "emprendedor").await;

        let emp = parse_body(self.send("POST", "/emprendedores", Some(token), Some(json!({
            "usuario_id": usuario_id,
            "nombre": "Lucía",
            "apellido": "Pérez",
            "negocio": "Peluquería Lucía",
            "descripcion": "Cortes y color"
        }))).await).await;
        let emprendedor_id = emp["id"].as_i64().expect("No emprendedor id");

        let srv = parse_body(self.send("POST", "/servicios", Some(token), Some(json!({
            "emprendedor_id": emprendedor_id,
            "nombre": "Corte",
            "descripcion": "Corte de pelo"
        }))).await).await;
        let servicio_id = srv["id"].as_i64().expect("No servicio id");

        let turno = parse_body(self.send("POST", "/turnos", Some(token), Some(json!({
            "servicio_id": servicio_id,
            "fecha_hora_inicio": "2030-03-14T10:00:00",
            "duracion_minutos": 30,
            "capacidad": capacidad,
            "precio": 2500.0
        }))).await).await;
        let turno_id = turno["id"].as_i64().expect("No turno id");

        (emprendedor_id, servicio_id, turno_id)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
