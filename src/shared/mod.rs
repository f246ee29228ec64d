//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the HTTP surface, the realtime gateway, and the persistence layer. All
//! types are designed for serialization and transmission over the wire.

/// Conversation and message data structures
pub mod chat;

/// Realtime event envelopes for the socket channel
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use chat::{ChatMessage, Conversation, ConversationSummary, ParticipantProfile};
pub use error::SharedError;
pub use event::{ClientEvent, ServerEvent};
