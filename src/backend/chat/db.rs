//! Database operations for conversations and messages
//!
//! This module contains the conversation store and the message store. Both
//! record kinds are soft-deleted only; messages stay behind when their
//! conversation is soft-deleted, and the listing queries filter deleted
//! rows out instead of removing them.

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::backend::error::types::{map_unique_violation, ChatError};
use crate::shared::chat::message::validate_content;
use crate::shared::chat::{
    participant_key, ChatMessage, Conversation, ConversationSummary, MessagePage,
    ParticipantProfile,
};

/// Default page size for message listing
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Create a new conversation for the given participant set.
///
/// The unique index on the normalized participant key rejects a second
/// active conversation for the same set; that violation is surfaced as
/// `ChatError::DuplicateConversation` for the resolver to recover from.
pub async fn create_conversation(
    pool: &PgPool,
    participants: &[Uuid],
) -> Result<Conversation, ChatError> {
    let mut distinct: Vec<Uuid> = participants.to_vec();
    distinct.sort();
    distinct.dedup();

    if distinct.len() < 2 {
        return Err(ChatError::validation(
            "participants",
            "a conversation needs at least 2 distinct participants",
        ));
    }

    let id = Uuid::new_v4();
    let now = Utc::now();
    let key = participant_key(&distinct);

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO conversations (id, participant_key, deleted, created_at, updated_at)
        VALUES ($1, $2, FALSE, $3, $3)
        "#,
    )
    .bind(id)
    .bind(&key)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(map_unique_violation)?;

    for user_id in &distinct {
        sqlx::query(
            r#"
            INSERT INTO conversation_participants (conversation_id, user_id, joined_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(Conversation {
        id,
        participants: distinct,
        deleted: false,
        created_at: now,
        updated_at: now,
    })
}

/// Find the active conversation whose participant set exactly matches
pub async fn find_conversation_by_participants(
    pool: &PgPool,
    participants: &[Uuid],
) -> Result<Option<Conversation>, ChatError> {
    let key = participant_key(participants);

    let row = sqlx::query(
        r#"
        SELECT id, deleted, created_at, updated_at
        FROM conversations
        WHERE participant_key = $1 AND NOT deleted
        "#,
    )
    .bind(&key)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(load_participants(pool, row).await?)),
        None => Ok(None),
    }
}

/// Get a conversation by id, deleted or not
pub async fn get_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<Option<Conversation>, ChatError> {
    let row = sqlx::query(
        r#"
        SELECT id, deleted, created_at, updated_at
        FROM conversations
        WHERE id = $1
        "#,
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(load_participants(pool, row).await?)),
        None => Ok(None),
    }
}

/// Attach the participant list to a fetched conversation row
async fn load_participants(
    pool: &PgPool,
    row: sqlx::postgres::PgRow,
) -> Result<Conversation, ChatError> {
    let id: Uuid = row.get("id");

    let participant_rows = sqlx::query(
        r#"
        SELECT user_id FROM conversation_participants
        WHERE conversation_id = $1
        ORDER BY user_id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Conversation {
        id,
        participants: participant_rows.iter().map(|r| r.get("user_id")).collect(),
        deleted: row.get("deleted"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// List the active conversations a user belongs to, newest activity first.
///
/// The other participants are resolved to display summaries via the
/// profiles table; the requesting user and participants without a profile
/// row are filtered out rather than returned as nulls.
pub async fn get_conversations_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ConversationSummary>, ChatError> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.created_at, c.updated_at
        FROM conversations c
        INNER JOIN conversation_participants cp ON c.id = cp.conversation_id
        WHERE cp.user_id = $1 AND NOT c.deleted
        ORDER BY c.updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut summaries = Vec::new();
    for row in rows {
        let conversation_id: Uuid = row.get("id");

        let participant_rows = sqlx::query(
            r#"
            SELECT p.user_id, p.display_name, p.avatar_url
            FROM conversation_participants cp
            INNER JOIN profiles p ON p.user_id = cp.user_id
            WHERE cp.conversation_id = $1 AND cp.user_id <> $2
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        summaries.push(ConversationSummary {
            id: conversation_id,
            participants: participant_rows
                .iter()
                .map(|r| ParticipantProfile {
                    user_id: r.get("user_id"),
                    display_name: r.get("display_name"),
                    avatar_url: r.get("avatar_url"),
                })
                .collect(),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        });
    }

    Ok(summaries)
}

/// Soft-delete a conversation. Messages are untouched.
pub async fn soft_delete_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<Option<Conversation>, ChatError> {
    let result = sqlx::query(
        r#"
        UPDATE conversations
        SET deleted = TRUE, updated_at = $1
        WHERE id = $2 AND NOT deleted
        "#,
    )
    .bind(Utc::now())
    .bind(conversation_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_conversation(pool, conversation_id).await
}

/// Check if a user is a participant in a conversation
pub async fn is_participant(
    pool: &PgPool,
    user_id: Uuid,
    conversation_id: Uuid,
) -> Result<bool, ChatError> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM conversation_participants
        WHERE conversation_id = $1 AND user_id = $2
        "#,
    )
    .bind(conversation_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let count: i64 = row.get("count");
    Ok(count > 0)
}

/// Persist a message.
///
/// Fails with `Validation` on empty content and `NotFound` if the
/// conversation is missing or soft-deleted. The conversation's
/// `updated_at` is bumped so the per-user listing sorts by activity.
pub async fn store_message(
    pool: &PgPool,
    conversation_id: Uuid,
    sender_id: Uuid,
    content: &str,
) -> Result<ChatMessage, ChatError> {
    validate_content(content)?;

    let conversation_row = sqlx::query(
        r#"
        SELECT deleted FROM conversations WHERE id = $1
        "#,
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await?;

    match conversation_row {
        None => return Err(ChatError::not_found("conversation")),
        Some(row) => {
            let deleted: bool = row.get("deleted");
            if deleted {
                return Err(ChatError::not_found("conversation"));
            }
        }
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO chat_messages (id, conversation_id, sender_id, content, is_read, deleted, created_at)
        VALUES ($1, $2, $3, $4, FALSE, FALSE, $5)
        "#,
    )
    .bind(id)
    .bind(conversation_id)
    .bind(sender_id)
    .bind(content)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        UPDATE conversations SET updated_at = $1 WHERE id = $2
        "#,
    )
    .bind(now)
    .bind(conversation_id)
    .execute(pool)
    .await?;

    Ok(ChatMessage {
        id,
        conversation_id,
        sender_id,
        content: content.to_string(),
        is_read: false,
        deleted: false,
        created_at: now,
    })
}

/// Get one page of a conversation's messages, newest first.
///
/// `page` is 1-based. Soft-deleted messages are excluded; the page order
/// is the documented reverse of append order.
pub async fn get_messages_for_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
    page: i64,
    limit: i64,
) -> Result<MessagePage, ChatError> {
    let page = page.max(1);
    let limit = if limit > 0 { limit } else { DEFAULT_PAGE_LIMIT };
    let offset = (page - 1) * limit;

    let total_row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM chat_messages
        WHERE conversation_id = $1 AND NOT deleted
        "#,
    )
    .bind(conversation_id)
    .fetch_one(pool)
    .await?;
    let total_docs: i64 = total_row.get("count");

    let rows = sqlx::query(
        r#"
        SELECT id, conversation_id, sender_id, content, is_read, deleted, created_at
        FROM chat_messages
        WHERE conversation_id = $1 AND NOT deleted
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(conversation_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(MessagePage {
        docs: rows.into_iter().map(message_from_row).collect(),
        total_docs,
        page,
        limit,
    })
}

/// Get a message by id
pub async fn get_message(
    pool: &PgPool,
    message_id: Uuid,
) -> Result<Option<ChatMessage>, ChatError> {
    let row = sqlx::query(
        r#"
        SELECT id, conversation_id, sender_id, content, is_read, deleted, created_at
        FROM chat_messages
        WHERE id = $1 AND NOT deleted
        "#,
    )
    .bind(message_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(message_from_row))
}

/// Mark a message as read
pub async fn mark_message_read(pool: &PgPool, message_id: Uuid) -> Result<bool, ChatError> {
    let result = sqlx::query(
        r#"
        UPDATE chat_messages SET is_read = TRUE WHERE id = $1 AND NOT deleted
        "#,
    )
    .bind(message_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Soft-delete a message
pub async fn soft_delete_message(pool: &PgPool, message_id: Uuid) -> Result<bool, ChatError> {
    let result = sqlx::query(
        r#"
        UPDATE chat_messages SET deleted = TRUE WHERE id = $1 AND NOT deleted
        "#,
    )
    .bind(message_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn message_from_row(row: sqlx::postgres::PgRow) -> ChatMessage {
    ChatMessage {
        id: row.get("id"),
        conversation_id: row.get("conversation_id"),
        sender_id: row.get("sender_id"),
        content: row.get("content"),
        is_read: row.get("is_read"),
        deleted: row.get("deleted"),
        created_at: row.get("created_at"),
    }
}
