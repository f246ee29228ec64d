//! Conversation Data Structure
//!
//! Represents a conversation between two or more users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Normalized participant-set key: sorted ids joined with `:`.
///
/// Two participant lists that contain the same ids in any order produce the
/// same key. The database enforces uniqueness of this key over non-deleted
/// conversations, which is what makes concurrent find-or-create safe.
pub fn participant_key(participants: &[Uuid]) -> String {
    let mut ids: Vec<Uuid> = participants.to_vec();
    ids.sort();
    ids.dedup();
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(":")
}

/// Represents a conversation between users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique conversation ID
    pub id: Uuid,
    /// Participant user IDs
    pub participants: Vec<Uuid>,
    /// Soft-delete flag; deleted conversations are hidden, never removed
    pub deleted: bool,
    /// When the conversation was created
    pub created_at: DateTime<Utc>,
    /// Bumped whenever a message is appended
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Check if user is a participant
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }

    /// Get the other participant (for direct conversations)
    pub fn other_participant(&self, current_user_id: Uuid) -> Option<Uuid> {
        self.participants
            .iter()
            .find(|&&id| id != current_user_id)
            .copied()
    }

    /// The normalized key for this conversation's participant set
    pub fn participant_key(&self) -> String {
        participant_key(&self.participants)
    }
}

/// Display-safe summary of a participant, resolved from the profile service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantProfile {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// A conversation as returned by the per-user listing: the requesting user
/// is filtered out and the remaining participants carry display info.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: Uuid,
    /// Other participants with profile info; unresolvable profiles are
    /// filtered out rather than returned as nulls
    pub participants: Vec<ParticipantProfile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a conversation.
///
/// Accepts both the canonical `participantAId`/`participantBId` naming and
/// the legacy `senderId`/`receiverId` spelling still used by older clients.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    pub participant_a_id: Option<Uuid>,
    pub participant_b_id: Option<Uuid>,
    pub sender_id: Option<Uuid>,
    pub receiver_id: Option<Uuid>,
}

impl CreateConversationRequest {
    /// Normalize either naming convention into a participant pair
    pub fn into_pair(self) -> Result<(Uuid, Uuid), SharedError> {
        let first = self.participant_a_id.or(self.sender_id).ok_or_else(|| {
            SharedError::validation("participantAId", "missing participant id")
        })?;
        let second = self.participant_b_id.or(self.receiver_id).ok_or_else(|| {
            SharedError::validation("participantBId", "missing participant id")
        })?;

        if first == second {
            return Err(SharedError::validation(
                "participants",
                "a conversation needs at least 2 distinct participants",
            ));
        }

        Ok((first, second))
    }
}
