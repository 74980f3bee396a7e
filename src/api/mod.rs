//! HTTP/WebSocket server implementation
//!
//! Exposes the realtime chat channel, the upload endpoint, and read-only
//! retrieval of stored files.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod websocket;

pub use server::{AppState, ChatServer};
