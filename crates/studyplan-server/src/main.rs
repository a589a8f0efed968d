use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use studyplan_ai::client::build_client;
use studyplan_ai::config::AiConfig;
use studyplan_ai::service::ScheduleService;
use studyplan_storage::MemStorage;

mod app;
mod config;
mod error;
mod extract;
mod middleware;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let server = ServerConfig::from_env()?;
    let ai = AiConfig::from_env()?;
    tracing::info!(provider = ai.provider.as_str(), model = %ai.model, "model provider configured");

    let client = build_client(&ai)?;

    let state = AppState {
        storage: Arc::new(MemStorage::new()),
        schedules: ScheduleService::new(client),
    };

    let app = app::build_router(state);

    let listener = TcpListener::bind(server.bind).await?;
    tracing::info!(addr = %server.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
