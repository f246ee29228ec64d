//! Chat Message Data Structure
//!
//! Represents a message in a conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Represents a chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message ID
    pub id: Uuid,
    /// Conversation this message belongs to
    pub conversation_id: Uuid,
    /// User who sent the message
    pub sender_id: Uuid,
    /// Message content
    pub content: String,
    /// Whether the message has been read by a recipient
    pub is_read: bool,
    /// Soft-delete flag
    pub deleted: bool,
    /// When the message was persisted; the per-conversation ordering key
    pub created_at: DateTime<Utc>,
}

/// Validate message content: non-empty after trimming.
pub fn validate_content(content: &str) -> Result<(), SharedError> {
    if content.trim().is_empty() {
        return Err(SharedError::validation(
            "content",
            "message content cannot be empty",
        ));
    }
    Ok(())
}

/// Request to send a message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
}

/// One page of messages, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePage {
    pub docs: Vec<ChatMessage>,
    pub total_docs: i64,
    pub page: i64,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_accepts_text() {
        assert!(validate_content("hello").is_ok());
    }

    #[test]
    fn test_validate_content_rejects_empty() {
        assert!(validate_content("").is_err());
    }

    #[test]
    fn test_validate_content_rejects_whitespace_only() {
        assert!(validate_content("  \n\t ").is_err());
    }

    #[test]
    fn test_message_serializes_camel_case() {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            content: "hello".to_string(),
            is_read: false,
            deleted: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("conversationId").is_some());
        assert!(json.get("senderId").is_some());
        assert!(json.get("isRead").is_some());
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_send_request_accepts_camel_case() {
        let json = serde_json::json!({
            "conversationId": Uuid::new_v4(),
            "senderId": Uuid::new_v4(),
            "content": "hi there",
        });

        let request: SendMessageRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.content, "hi there");
    }
}
