//! Conversation Resolver
//!
//! Find-or-create for conversations. Two clients asking for the same pair
//! at the same time must end up in the same conversation: the lookup and
//! the create race, and the loser's insert trips the partial unique index
//! on the normalized participant key. The resolver treats that violation
//! as "someone else created it first" and re-looks-up the winning row, so
//! `DuplicateConversation` never escapes to callers.

use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::chat::db;
use crate::backend::error::ChatError;
use crate::shared::chat::Conversation;

/// Return the active conversation for a participant pair, creating it if
/// none exists.
pub async fn get_or_create_conversation(
    pool: &PgPool,
    participant_a: Uuid,
    participant_b: Uuid,
) -> Result<Conversation, ChatError> {
    get_or_create_for_set(pool, &[participant_a, participant_b]).await
}

/// Find-or-create for an arbitrary participant set of 2 or more
pub async fn get_or_create_for_set(
    pool: &PgPool,
    participants: &[Uuid],
) -> Result<Conversation, ChatError> {
    if let Some(existing) = db::find_conversation_by_participants(pool, participants).await? {
        tracing::debug!(
            "[Resolver] Found existing conversation {} for participant set",
            existing.id
        );
        return Ok(existing);
    }

    match db::create_conversation(pool, participants).await {
        Ok(created) => {
            tracing::info!("[Resolver] Created conversation {}", created.id);
            Ok(created)
        }
        Err(err) if err.is_duplicate() => {
            // Lost the create race; the winner's row is now visible.
            tracing::debug!("[Resolver] Create raced, returning existing conversation");
            db::find_conversation_by_participants(pool, participants)
                .await?
                .ok_or(ChatError::DuplicateConversation)
        }
        Err(err) => Err(err),
    }
}
