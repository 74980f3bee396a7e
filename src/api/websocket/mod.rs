//! WebSocket handlers
//!
//! Uses bounded per-connection queues with try_send so a slow client drops
//! frames instead of holding up broadcasts to everyone else.

pub mod chat;

/// Maximum number of frames to buffer per WebSocket connection
pub const WS_BUFFER_SIZE: usize = 256;
