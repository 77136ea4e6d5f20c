//! PDF Form Conversion Service
//!
//! Accepts PDF documents over HTTP, hands each one to the external parsing
//! engine, and replies with a minimal JSON projection of its text and form
//! fields.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdfform_server::config::Config;
use pdfform_server::engine::ProcessEngine;
use pdfform_server::orchestrator::ParseOrchestrator;
use pdfform_server::routes;
use pdfform_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfform_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!(
        "Starting {} v{}",
        config.service.name,
        config.service.version
    );
    tracing::info!("Parse engine command: {}", config.engine.command);

    let engine = ProcessEngine::new(&config.engine.command, config.engine.args.clone());
    if !engine.is_available().await {
        tracing::warn!(
            "Parse engine '{}' not found; parses will fail until it is installed",
            config.engine.command
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("invalid SERVER_HOST/SERVER_PORT");

    let orchestrator = ParseOrchestrator::new(Arc::new(engine));
    let state = AppState::new(config, orchestrator);
    let app = routes::app(state.clone());

    tracing::info!("{} listening on {}", state.config().service.name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
