//! Realtime Fan-out Module
//!
//! Live delivery of newly persisted messages to connected clients.
//!
//! # Architecture
//!
//! ```text
//! realtime/
//! ├── mod.rs - Module exports and documentation
//! ├── hub.rs - Per-conversation broadcast rooms
//! └── ws.rs  - WebSocket session gateway
//! ```
//!
//! The hub owns the ephemeral room-membership state (which live
//! connections care about which conversation); the gateway owns the
//! per-connection lifecycle (join requests, heartbeat, teardown). Neither
//! is a source of truth: a missed broadcast is recovered through the
//! message listing endpoint.

/// Per-conversation broadcast rooms
pub mod hub;

/// WebSocket session gateway
pub mod ws;

// Re-export commonly used types and functions
pub use hub::RoomHub;
pub use ws::chat_socket;
