//! LAN Chat - Minimal same-network chat server
//!
//! A small chat server for machines on one LAN, written in Rust.
//!
//! ## Features
//!
//! - Realtime chat over WebSocket with fan-out to every connected client
//! - File sharing: HTTP uploads announced to everyone and served read-only
//! - Server-assigned event ids and timestamps (clients are never trusted)
//! - Fire-and-forget delivery: a slow or dead connection never blocks the rest

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use config::Config;
pub use error::{ChatError, Result};
