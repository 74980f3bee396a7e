use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default sender name stamped on events when the client supplies none.
pub const DEFAULT_SENDER: &str = "Anonymous";

/// One broadcastable unit of chat/system/file information.
///
/// Serialized as JSON with a `type` discriminator, e.g.
/// `{"type":"chat","id":"...","sender":"...","message":"...","timestamp":...}`.
/// `id` and `timestamp` are always assigned server-side; client-supplied values
/// never survive into a broadcast event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Chat {
        id: Uuid,
        sender: String,
        message: String,
        timestamp: i64,
    },
    System {
        id: Uuid,
        message: String,
        timestamp: i64,
    },
    File {
        id: Uuid,
        name: String,
        size: u64,
        url: String,
        sender: String,
        timestamp: i64,
    },
}

impl Event {
    /// Create a chat event with a fresh id and current timestamp
    pub fn chat(sender: impl Into<String>, message: impl Into<String>) -> Self {
        Event::Chat {
            id: Uuid::new_v4(),
            sender: sender.into(),
            message: message.into(),
            timestamp: now_millis(),
        }
    }

    /// Create a system event with a fresh id and current timestamp
    pub fn system(message: impl Into<String>) -> Self {
        Event::System {
            id: Uuid::new_v4(),
            message: message.into(),
            timestamp: now_millis(),
        }
    }

    /// Create a file event with a fresh id and current timestamp
    pub fn file(
        name: impl Into<String>,
        size: u64,
        url: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Event::File {
            id: Uuid::new_v4(),
            name: name.into(),
            size,
            url: url.into(),
            sender: sender.into(),
            timestamp: now_millis(),
        }
    }

    /// Event id
    pub fn id(&self) -> Uuid {
        match self {
            Event::Chat { id, .. } | Event::System { id, .. } | Event::File { id, .. } => *id,
        }
    }

    /// Event timestamp (epoch milliseconds)
    pub fn timestamp(&self) -> i64 {
        match self {
            Event::Chat { timestamp, .. }
            | Event::System { timestamp, .. }
            | Event::File { timestamp, .. } => *timestamp,
        }
    }
}

/// Inbound frame from a client.
///
/// Only the `chat` variant exists: `system` and `file` events are
/// server-generated, so frames declaring any other type fail to parse and are
/// discarded at the router. Unknown fields (including client-supplied `id` and
/// `timestamp`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientFrame {
    Chat { sender: String, message: String },
}

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
