//! Chat server using Axum
//!
//! Assembles the router and runs the serve loop with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::chat::{Broadcaster, ConnectionRegistry, MessageRouter};
use crate::config::ServerConfig;
use crate::error::{ChatError, Result};
use crate::storage::UploadStore;

use super::routes;

/// Shared state for handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConnectionRegistry>,
    pub broadcaster: Broadcaster,
    pub router: MessageRouter,
    pub store: Arc<UploadStore>,
}

/// Chat server
pub struct ChatServer {
    config: ServerConfig,
    state: AppState,
}

impl ChatServer {
    /// Create a new chat server
    pub fn new(
        config: ServerConfig,
        registry: Arc<ConnectionRegistry>,
        broadcaster: Broadcaster,
        store: Arc<UploadStore>,
    ) -> Self {
        let router = MessageRouter::new(broadcaster.clone());

        let state = AppState {
            registry,
            broadcaster,
            router,
            store,
        };

        Self { config, state }
    }

    /// Build the router
    fn build_router(&self) -> Router {
        routes::create_router(self.state.clone())
            .layer(DefaultBodyLimit::max(self.config.max_upload_bytes()))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ChatError::InvalidConfig(format!(
                    "Invalid bind address {}:{}",
                    self.config.host, self.config.port
                ))
            })?;

        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("LAN chat server listening on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        info!("Chat server shut down");
        Ok(())
    }
}
