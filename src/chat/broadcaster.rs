//! Event fan-out
//!
//! Serializes an event once and delivers it to every open connection.
//! Fire-and-forget: a closed or saturated connection is skipped without
//! aborting delivery to the rest.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error};

use super::registry::ConnectionRegistry;
use crate::models::Event;

/// Fans one event out to every registered connection
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Broadcast an event to all currently open connections.
    ///
    /// Returns the number of connections the frame was queued for. Events
    /// queued by successive calls arrive in call order on each connection
    /// that receives them.
    pub fn broadcast(&self, event: &Event) -> usize {
        let frame = match serde_json::to_string(event) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to serialize event: {}", e);
                return 0;
            }
        };

        let mut delivered = 0;
        for (id, tx) in self.registry.snapshot() {
            match tx.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    debug!(connection_id = %id, "Outbound buffer full, dropping frame");
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(connection_id = %id, "Connection closed, skipping");
                }
            }
        }
        delivered
    }
}
