//! Chat Route Configuration
//!
//! This module defines the REST routes for conversations and messages.
//!
//! # Routes
//!
//! - `POST /conversations` - Find-or-create a conversation for a pair
//! - `GET /conversations/for/{id}` - List a user's conversations
//! - `GET /conversations/find/{first_id}/{second_id}` - Exact pair lookup
//! - `PATCH /conversations/{id}/delete` - Soft-delete a conversation
//! - `POST /messages` - Send a message (persist, then broadcast)
//! - `GET /messages/{id}` - Paginated messages for a conversation
//! - `GET /messages/by-id/{id}` - Single message lookup
//! - `PATCH /messages/{id}/read` - Mark a message as read
//! - `PATCH /messages/{id}/delete` - Soft-delete a message

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::backend::chat::handlers;
use crate::backend::server::state::AppState;

/// Configure conversation and message routes
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/conversations", post(handlers::create_conversation))
        .route(
            "/conversations/for/{id}",
            get(handlers::get_conversations_for_user),
        )
        .route(
            "/conversations/find/{first_id}/{second_id}",
            get(handlers::find_conversation),
        )
        .route(
            "/conversations/{id}/delete",
            patch(handlers::delete_conversation),
        )
        .route("/messages", post(handlers::send_message))
        .route("/messages/{id}", get(handlers::get_messages))
        .route("/messages/by-id/{id}", get(handlers::get_message_by_id))
        .route("/messages/{id}/read", patch(handlers::mark_message_read))
        .route("/messages/{id}/delete", patch(handlers::delete_message))
}
