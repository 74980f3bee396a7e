//! Route definitions

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use super::handlers;
use super::server::AppState;
use super::websocket;

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let downloads = ServeDir::new(state.store.root());

    Router::new()
        // Realtime channel at the server root
        .route("/", get(websocket::chat::chat_ws))
        // File upload
        .route("/upload", post(handlers::upload::upload_file))
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Read-only retrieval of stored uploads
        .nest_service("/downloads", downloads)
        .with_state(state)
}
