//! Realtime chat core
//!
//! Connection lifecycle, event fan-out, and the inbound trust boundary.

pub mod broadcaster;
pub mod registry;
pub mod router;

pub use broadcaster::Broadcaster;
pub use registry::{ConnectionId, ConnectionRegistry, FrameSender};
pub use router::MessageRouter;
