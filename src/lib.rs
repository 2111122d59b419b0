pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;

use crate::config::Config;
use crate::infra::factory::bootstrap_state;
use api::router::create_router;
use std::sync::Arc;
use tracing::info;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "turnos-backend";

/// Installs the global subscriber: human-readable output on stdout (driven by
/// `RUST_LOG`) and JSON lines in a daily file under `log_dir`.
pub fn init_logging(log_dir: &str) -> WorkerGuard {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
        .expect("Failed to create log directory");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let crate_filter = EnvFilter::new(format!("info,{}=debug", env!("CARGO_CRATE_NAME")));
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().with_target(false).with_filter(console_filter))
        .with(fmt::layer().json().with_current_span(true).with_writer(file_writer).with_filter(crate_filter))
        .init();

    info!(log_dir, "Logging initialized");
    guard
}

pub async fn run() {
    let config = Config::from_env();
    let _guard = init_logging(&config.log_dir);

    let state = Arc::new(bootstrap_state(&config).await);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind listener");

    info!("Server running on port {}", config.port);
    axum::serve(listener, app).await.expect("Server error");
}
