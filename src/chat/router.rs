//! Inbound message router
//!
//! Trust boundary for client frames: only well-formed `chat` frames are
//! accepted, and their id/timestamp are always reassigned server-side.
//! Everything else is discarded silently without touching the connection.

use tracing::trace;

use super::broadcaster::Broadcaster;
use crate::models::{ClientFrame, Event};

/// Validates and tags inbound client frames, then hands them to the broadcaster
#[derive(Clone)]
pub struct MessageRouter {
    broadcaster: Broadcaster,
}

impl MessageRouter {
    pub fn new(broadcaster: Broadcaster) -> Self {
        Self { broadcaster }
    }

    /// Parse raw client data into a server-tagged event.
    ///
    /// Returns `None` for malformed JSON and for any type other than `chat`.
    /// Client-supplied `id`/`timestamp` fields are ignored; the returned event
    /// carries a fresh id and the current server time.
    pub fn accept(raw: &str) -> Option<Event> {
        let frame: ClientFrame = serde_json::from_str(raw).ok()?;
        let ClientFrame::Chat { sender, message } = frame;
        Some(Event::chat(sender, message))
    }

    /// Handle one inbound frame: accept and broadcast, or discard.
    pub fn handle(&self, raw: &str) -> Option<Event> {
        match Self::accept(raw) {
            Some(event) => {
                self.broadcaster.broadcast(&event);
                Some(event)
            }
            None => {
                trace!("Discarding unparseable or untrusted inbound frame");
                None
            }
        }
    }
}
