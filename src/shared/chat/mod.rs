//! Chat Data Structures
//!
//! This module contains the data structures for the chat system:
//!
//! - `Conversation` - A conversation between two or more users
//! - `ChatMessage` - A message in a conversation
//!
//! The canonical participant field is `participants`; request adapters at
//! the API boundary accept the legacy `senderId`/`receiverId` spelling and
//! normalize it here.
//!
//! # Usage
//!
//! ```rust
//! use talkwire::shared::chat::{ChatMessage, Conversation};
//! ```

pub mod conversation;
pub mod message;

// Re-export all types
pub use conversation::{
    participant_key, Conversation, ConversationSummary, CreateConversationRequest,
    ParticipantProfile,
};
pub use message::{ChatMessage, MessagePage, SendMessageRequest};
