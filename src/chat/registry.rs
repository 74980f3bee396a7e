//! Connection registry
//!
//! Owns the live set of open client connections. Each connection is a bounded
//! queue of serialized frames drained by that connection's writer task, so
//! registry operations never block on a slow client.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::models::Event;

/// Identifier for one registered connection
pub type ConnectionId = Uuid;

/// Outbound side of a connection's frame queue
pub type FrameSender = mpsc::Sender<String>;

/// The live set of open client connections.
///
/// The connection map is the only shared mutable structure in the system. The
/// lock is held only for map mutation and snapshotting, never across sends or
/// await points.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, FrameSender>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and queue its private welcome event.
    ///
    /// The welcome is sent to this connection only, before it becomes visible
    /// to broadcasts.
    pub fn register(&self, tx: FrameSender) -> ConnectionId {
        let id = Uuid::new_v4();

        let welcome = Event::system("Connected to LAN chat");
        match serde_json::to_string(&welcome) {
            Ok(frame) => {
                if tx.try_send(frame).is_err() {
                    debug!(connection_id = %id, "Failed to queue welcome event");
                }
            }
            Err(e) => error!("Failed to serialize welcome event: {}", e),
        }

        let total = {
            let mut connections = self.connections.lock();
            connections.insert(id, tx);
            connections.len()
        };
        info!(connection_id = %id, total, "Client connected");

        id
    }

    /// Remove a connection on close/error
    pub fn unregister(&self, id: ConnectionId) {
        let total = {
            let mut connections = self.connections.lock();
            connections.remove(&id);
            connections.len()
        };
        info!(connection_id = %id, total, "Client disconnected");
    }

    /// Point-in-time copy of the open connection set.
    ///
    /// A connection closing mid-iteration shows up as a failed send on its
    /// queue and is skipped by the caller.
    pub fn snapshot(&self) -> Vec<(ConnectionId, FrameSender)> {
        self.connections
            .lock()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect()
    }

    /// Number of currently registered connections
    pub fn len(&self) -> usize {
        self.connections.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.lock().is_empty()
    }
}
