//! Chat HTTP Handlers
//!
//! This module contains the HTTP handlers for conversations and messages.
//!
//! The send path is persist-then-broadcast: a message only reaches the
//! fan-out hub after the store acknowledged it, so a failed append never
//! produces a `chat message` event and the sender only observes success
//! from persistence. Broadcast delivery itself is best-effort.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::chat::{db, resolver};
use crate::backend::error::ChatError;
use crate::backend::server::state::AppState;
use crate::shared::chat::message::validate_content;
use crate::shared::chat::{
    ChatMessage, Conversation, ConversationSummary, CreateConversationRequest, MessagePage,
    SendMessageRequest,
};
use crate::shared::event::ServerEvent;

fn require_pool(db_pool: &Option<PgPool>) -> Result<&PgPool, ChatError> {
    db_pool.as_ref().ok_or(ChatError::PersistenceUnavailable)
}

/// Create (or return the existing) conversation for a participant pair
///
/// Accepts both `{participantAId, participantBId}` and the legacy
/// `{senderId, receiverId}` body; both are normalized before the resolver
/// runs, so repeated calls for the same pair in either spelling resolve to
/// the same conversation.
pub async fn create_conversation(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<CreateConversationRequest>,
) -> Result<(StatusCode, Json<Conversation>), ChatError> {
    let (first, second) = request.into_pair()?;
    let pool = require_pool(&db_pool)?;

    let conversation = resolver::get_or_create_conversation(pool, first, second).await?;

    Ok((StatusCode::CREATED, Json(conversation)))
}

/// Find the active conversation containing exactly the two participants
pub async fn find_conversation(
    State(db_pool): State<Option<PgPool>>,
    Path((first_id, second_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Conversation>, ChatError> {
    let pool = require_pool(&db_pool)?;

    let conversation = db::find_conversation_by_participants(pool, &[first_id, second_id])
        .await?
        .ok_or_else(|| ChatError::not_found("conversation"))?;

    Ok(Json(conversation))
}

/// List the active conversations for a user, with participant display info
pub async fn get_conversations_for_user(
    State(db_pool): State<Option<PgPool>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ConversationSummary>>, ChatError> {
    let pool = require_pool(&db_pool)?;

    let conversations = db::get_conversations_for_user(pool, user_id).await?;

    Ok(Json(conversations))
}

/// Soft-delete a conversation; its messages stay behind
pub async fn delete_conversation(
    State(db_pool): State<Option<PgPool>>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<Conversation>, ChatError> {
    let pool = require_pool(&db_pool)?;

    let conversation = db::soft_delete_conversation(pool, conversation_id)
        .await?
        .ok_or_else(|| ChatError::not_found("conversation"))?;

    tracing::info!("[Chat] Conversation {} soft-deleted", conversation_id);
    Ok(Json(conversation))
}

/// Send a message: persist it, then fan it out to the conversation's room
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), ChatError> {
    // Reject empty content before touching the store so no broadcast can
    // happen for an append that never had a chance to persist.
    validate_content(&request.content)?;
    let pool = require_pool(&state.db_pool)?;

    let message = db::store_message(
        pool,
        request.conversation_id,
        request.sender_id,
        &request.content,
    )
    .await?;

    let receivers = state
        .hub
        .broadcast(message.conversation_id, ServerEvent::ChatMessage(message.clone()));
    tracing::debug!(
        "[Chat] Message {} broadcast to {} room members",
        message.id,
        receivers
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// Query parameters for listing messages
#[derive(Debug, serde::Deserialize)]
pub struct ListMessagesParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Get one page of a conversation's messages, newest first
pub async fn get_messages(
    State(db_pool): State<Option<PgPool>>,
    Path(conversation_id): Path<Uuid>,
    Query(params): Query<ListMessagesParams>,
) -> Result<Json<MessagePage>, ChatError> {
    let pool = require_pool(&db_pool)?;

    let page = db::get_messages_for_conversation(
        pool,
        conversation_id,
        params.page.unwrap_or(1),
        params.limit.unwrap_or(db::DEFAULT_PAGE_LIMIT),
    )
    .await?;

    Ok(Json(page))
}

/// Get a single message by id
pub async fn get_message_by_id(
    State(db_pool): State<Option<PgPool>>,
    Path(message_id): Path<Uuid>,
) -> Result<Json<ChatMessage>, ChatError> {
    let pool = require_pool(&db_pool)?;

    let message = db::get_message(pool, message_id)
        .await?
        .ok_or_else(|| ChatError::not_found("message"))?;

    Ok(Json(message))
}

/// Mark a message as read
pub async fn mark_message_read(
    State(db_pool): State<Option<PgPool>>,
    Path(message_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ChatError> {
    let pool = require_pool(&db_pool)?;

    if !db::mark_message_read(pool, message_id).await? {
        return Err(ChatError::not_found("message"));
    }

    Ok(Json(serde_json::json!({ "message": "read" })))
}

/// Soft-delete a message
pub async fn delete_message(
    State(db_pool): State<Option<PgPool>>,
    Path(message_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ChatError> {
    let pool = require_pool(&db_pool)?;

    if !db::soft_delete_message(pool, message_id).await? {
        return Err(ChatError::not_found("message"));
    }

    Ok(Json(serde_json::json!({ "message": "deleted" })))
}
