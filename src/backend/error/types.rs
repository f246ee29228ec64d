//! Backend Error Types
//!
//! This module defines the error taxonomy used across the chat handlers,
//! the conversation resolver, and the persistence layer.
//!
//! # Error Categories
//!
//! Client errors (`Validation`, `NotFound`) are surfaced directly and never
//! retried. `DuplicateConversation` is transient: it marks a lost race on
//! the participant-key unique index, and the resolver recovers from it by
//! re-looking-up the winning row, so callers normally never see it.
//! `PersistenceUnavailable` means the store is not configured or not
//! reachable; no broadcast is attempted for an operation that failed there.

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// All errors the chat backend can produce
#[derive(Debug, Error)]
pub enum ChatError {
    /// Malformed input: empty content, too few participants, missing field
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Referenced resource does not exist or is soft-deleted
    #[error("{resource} not found")]
    NotFound {
        /// The resource kind, e.g. "conversation" or "message"
        resource: String,
    },

    /// A concurrent create for the same participant set won the race.
    /// Recovered internally by the resolver via re-lookup.
    #[error("conversation already exists for this participant set")]
    DuplicateConversation,

    /// The persistence store is not configured or unreachable
    #[error("persistence store unavailable")]
    PersistenceUnavailable,

    /// Unexpected database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChatError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Whether this error is the recoverable create-race marker
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateConversation)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `NotFound` - 404 Not Found
    /// - `DuplicateConversation` - 409 Conflict (only if it ever escapes
    ///   the resolver)
    /// - `PersistenceUnavailable` - 503 Service Unavailable
    /// - `Database` / `Serialization` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateConversation => StatusCode::CONFLICT,
            Self::PersistenceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SharedError> for ChatError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation { field, message },
            SharedError::SerializationError { message } => Self::Validation {
                field: "body".to_string(),
                message,
            },
        }
    }
}

/// Map a sqlx error, converting unique-index violations on the participant
/// key into the recoverable `DuplicateConversation` marker.
pub fn map_unique_violation(err: sqlx::Error) -> ChatError {
    if let sqlx::Error::Database(ref db_err) = err {
        // Postgres unique_violation
        if db_err.code().as_deref() == Some("23505") {
            return ChatError::DuplicateConversation;
        }
    }
    ChatError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = ChatError::validation("content", "cannot be empty");
        match error {
            ChatError::Validation { field, message } => {
                assert_eq!(field, "content");
                assert_eq!(message, "cannot be empty");
            }
            _ => panic!("Expected Validation"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ChatError::validation("x", "y").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ChatError::not_found("conversation").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ChatError::DuplicateConversation.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ChatError::PersistenceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_not_found_message_names_resource() {
        let error = ChatError::not_found("message");
        assert_eq!(format!("{}", error), "message not found");
    }

    #[test]
    fn test_from_shared_error() {
        let shared = SharedError::validation("participants", "need 2");
        let error: ChatError = shared.into();

        match error {
            ChatError::Validation { field, .. } => assert_eq!(field, "participants"),
            _ => panic!("Expected Validation variant"),
        }
    }

    #[test]
    fn test_is_duplicate() {
        assert!(ChatError::DuplicateConversation.is_duplicate());
        assert!(!ChatError::PersistenceUnavailable.is_duplicate());
    }

    #[test]
    fn test_map_unique_violation_passes_through_other_errors() {
        let error = map_unique_violation(sqlx::Error::RowNotFound);
        assert!(matches!(error, ChatError::Database(_)));
    }
}
