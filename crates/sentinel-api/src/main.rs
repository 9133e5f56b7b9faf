//! Prompt Sentinel API server.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use sentinel_api::config::RuntimeEnv;
use sentinel_api::router::create_router_with_state;
use sentinel_api::{AppConfig, AppState};
use sentinel_core::{ApiKey, Project};
use sentinel_store::MemoryStore;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::load()?;

    // Install the metrics recorder before any counter is touched.
    let metrics_handle = PrometheusBuilder::new().install_recorder()?;

    let store = Arc::new(MemoryStore::new());
    if config.environment == RuntimeEnv::Development {
        seed_demo_data(&store).await;
    }

    let state = AppState::in_memory(config.clone(), store);
    let app = create_router_with_state(state).route(
        "/metrics",
        axum::routing::get(move || std::future::ready(metrics_handle.render())),
    );

    // Bind server (respect PORT env for container platforms)
    let port = std::env::var("PORT").unwrap_or_else(|_| config.server.port.to_string());
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Prompt Sentinel API listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Populate the in-memory store with a demo project and key so the
/// service is exercisable out of the box in development.
async fn seed_demo_data(store: &MemoryStore) {
    let project = Project::new("First Project", "project-2481057316", "Default Policy");
    let key = ApiKey::issue("First Project Key", Some(project.id));

    info!(secret = %key.secret, "seeded development API key");

    store.add_project(project).await;
    store.add_key(key).await;
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, starting graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting graceful shutdown..."),
    }
}
