//! Realtime Event Envelopes
//!
//! This module defines the event types exchanged over the chat socket.
//! Events carry an `event` discriminator and a `data` payload so the wire
//! format matches what the client socket library emits and listens for:
//!
//! - Client → server: `join conversation` with the conversation id
//! - Server → client: `chat message` with the full persisted message
//!
//! Delivery over the socket is best-effort notification only. The message
//! listing endpoint remains the durable source of truth; a client that
//! misses a broadcast catches up on reconnect.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::chat::ChatMessage;

/// Events a connected client may send to the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Declare interest in a conversation's live messages
    #[serde(rename = "join conversation")]
    JoinConversation {
        #[serde(rename = "conversationId")]
        conversation_id: Uuid,
    },
}

/// Events the server pushes to connected clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// A newly persisted message, fanned out to every member of its room
    #[serde(rename = "chat message")]
    ChatMessage(ChatMessage),

    /// A join was rejected or a request could not be parsed
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerEvent {
    /// The conversation a message event belongs to, if any
    pub fn conversation_id(&self) -> Option<Uuid> {
        match self {
            Self::ChatMessage(message) => Some(message.conversation_id),
            Self::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_message() -> ChatMessage {
        ChatMessage {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            content: "hello".to_string(),
            is_read: false,
            deleted: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_join_event_wire_format() {
        let id = Uuid::new_v4();
        let json = serde_json::json!({
            "event": "join conversation",
            "data": { "conversationId": id },
        });

        let event: ClientEvent = serde_json::from_value(json).unwrap();
        assert_eq!(
            event,
            ClientEvent::JoinConversation {
                conversation_id: id
            }
        );
    }

    #[test]
    fn test_chat_message_event_wire_format() {
        let message = sample_message();
        let event = ServerEvent::ChatMessage(message.clone());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "chat message");
        assert_eq!(
            json["data"]["conversationId"],
            serde_json::json!(message.conversation_id)
        );
        assert_eq!(json["data"]["content"], "hello");
    }

    #[test]
    fn test_conversation_id_accessor() {
        let message = sample_message();
        let expected = message.conversation_id;

        assert_eq!(
            ServerEvent::ChatMessage(message).conversation_id(),
            Some(expected)
        );
        assert_eq!(
            ServerEvent::Error {
                message: "nope".to_string()
            }
            .conversation_id(),
            None
        );
    }
}
