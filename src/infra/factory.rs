use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::infra::repositories::{
    postgres_usuario_repo::PostgresUsuarioRepo, postgres_emprendedor_repo::PostgresEmprendedorRepo,
    postgres_servicio_repo::PostgresServicioRepo, postgres_turno_repo::PostgresTurnoRepo,
    postgres_reserva_repo::PostgresReservaRepo, postgres_token_repo::PostgresTokenRepo,
    sqlite_usuario_repo::SqliteUsuarioRepo, sqlite_emprendedor_repo::SqliteEmprendedorRepo,
    sqlite_servicio_repo::SqliteServicioRepo, sqlite_turno_repo::SqliteTurnoRepo,
    sqlite_reserva_repo::SqliteReservaRepo, sqlite_token_repo::SqliteTokenRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        postgres_state(config, pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        sqlite_state(config, pool)
    }
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    let token_repo = Arc::new(PostgresTokenRepo::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(token_repo, config.clone()));

    AppState {
        config: config.clone(),
        usuario_repo: Arc::new(PostgresUsuarioRepo::new(pool.clone())),
        emprendedor_repo: Arc::new(PostgresEmprendedorRepo::new(pool.clone())),
        servicio_repo: Arc::new(PostgresServicioRepo::new(pool.clone())),
        turno_repo: Arc::new(PostgresTurnoRepo::new(pool.clone())),
        reserva_repo: Arc::new(PostgresReservaRepo::new(pool)),
        auth_service,
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    let token_repo = Arc::new(SqliteTokenRepo::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(token_repo, config.clone()));

    AppState {
        config: config.clone(),
        usuario_repo: Arc::new(SqliteUsuarioRepo::new(pool.clone())),
        emprendedor_repo: Arc::new(SqliteEmprendedorRepo::new(pool.clone())),
        servicio_repo: Arc::new(SqliteServicioRepo::new(pool.clone())),
        turno_repo: Arc::new(SqliteTurnoRepo::new(pool.clone())),
        reserva_repo: Arc::new(SqliteReservaRepo::new(pool)),
        auth_service,
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
