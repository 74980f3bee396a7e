//! LAN Chat Server - Entry Point
//!
//! Starts the chat server with graceful shutdown support.

use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod chat;
mod config;
mod error;
mod models;
mod storage;

use api::ChatServer;
use chat::{Broadcaster, ConnectionRegistry};
use config::Config;
use storage::UploadStore;

#[tokio::main]
async fn main() -> error::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lan_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LAN chat server");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Prepare upload storage (startup-fatal if the directory cannot be created)
    let store = Arc::new(UploadStore::new(&config.storage.upload_dir)?);
    info!(dir = %config.storage.upload_dir.display(), "Upload storage ready");

    // Connection registry and broadcaster
    let registry = Arc::new(ConnectionRegistry::new());
    let broadcaster = Broadcaster::new(registry.clone());

    // Create the server
    let server = ChatServer::new(config.server.clone(), registry, broadcaster, store);

    // Create shutdown channel
    let (shutdown_tx, _) = watch::channel(false);

    let server_shutdown = shutdown_tx.subscribe();
    let server_task = tokio::spawn(async move {
        if let Err(e) = server.run(server_shutdown).await {
            error!("Chat server error: {}", e);
        }
    });

    info!("LAN chat server running at http://{}", config.bind_addr());

    // Wait for shutdown signal
    shutdown_signal().await;
    info!("Shutdown signal received");

    let _ = shutdown_tx.send(true);
    let _ = server_task.await;

    info!("LAN chat server stopped");
    Ok(())
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
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
