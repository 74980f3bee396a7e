//! Chat WebSocket handler
//!
//! One upgraded socket per client at the server root. The connection is
//! registered for broadcasts on upgrade and unregistered when either half of
//! the socket ends.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::WS_BUFFER_SIZE;
use crate::api::server::AppState;

/// WebSocket upgrade handler for the realtime chat channel
pub async fn chat_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_chat_ws(socket, state))
}

/// Handle one chat WebSocket connection
async fn handle_chat_ws(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(WS_BUFFER_SIZE);

    let connection_id = state.registry.register(tx);
    info!(%connection_id, "Chat WebSocket connected");

    // Drain the outbound queue into the socket
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    // Route inbound frames; anything unparseable or untrusted is dropped
    // without disturbing the connection
    let router = state.router.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(raw)) => {
                    router.handle(&raw);
                }
                Ok(Message::Close(_)) => {
                    debug!("Chat WebSocket received close");
                    break;
                }
                Ok(Message::Ping(_)) => {
                    // Pong is handled automatically by axum
                }
                Err(e) => {
                    debug!("Chat WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Either half ending tears the connection down
    tokio::select! {
        _ = send_task => {
            debug!("Send task ended");
        }
        _ = receive_task => {
            debug!("Receive task ended");
        }
    }

    state.registry.unregister(connection_id);
    info!(%connection_id, "Chat WebSocket disconnected");
}
