pub mod api;
pub mod background;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod site;
pub mod state;

use crate::config::{Config, SiteConfig};
use crate::infra::factory::bootstrap_state;
use crate::site::{router::create_site_router, state::SiteState};
use api::router::create_router;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::background::start_background_worker;

/// Pretty stdout plus a daily-rolled JSON file under `log_dir`. Keep the guard alive for the process lifetime.
pub fn init_logging(log_dir: &str, file_name: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("info,client_reporter=debug"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized. Writing JSON logs to {}/", log_dir);
    guard
}

pub async fn run() -> std::io::Result<()> {
    let config = Config::from_env();
    let _guard = init_logging(&config.log_dir, "client-reporter.log");

    let state = Arc::new(bootstrap_state(&config).await);

    let worker_state = state.clone();
    tokio::spawn(async move {
        start_background_worker(worker_state).await;
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!("🚀 ClientReporter API running on port {}", config.port);
    axum::serve(listener, app).await
}

pub async fn run_docs_site(config: SiteConfig) -> std::io::Result<()> {
    let state = SiteState::new(&config.docs_root).map_err(std::io::Error::other)?;
    let app = create_site_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!("📚 Docs site serving {} on port {}", config.docs_root, config.port);
    axum::serve(listener, app).await
}

pub fn export_docs_site(config: &SiteConfig, out_dir: &Path) -> std::io::Result<usize> {
    let state = SiteState::new(&config.docs_root).map_err(std::io::Error::other)?;
    let written = site::export::export_site(&state, out_dir).map_err(std::io::Error::other)?;
    Ok(written.len())
}
