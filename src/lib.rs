//! Talkwire - Chat Delivery Service
//!
//! Talkwire is the near-real-time chat backend of a social platform:
//! conversations, ordered messages, and live fan-out of newly persisted
//! messages to connected participants.
//!
//! # Overview
//!
//! This library provides:
//! - Conversation and message stores backed by PostgreSQL, soft-delete only
//! - A find-or-create conversation resolver that is safe under concurrent
//!   creation for the same participant pair
//! - An in-process room hub fanning persisted messages out to WebSocket
//!   subscribers, one room per conversation
//! - A session gateway handling join requests, heartbeat, and teardown
//!
//! # Module Structure
//!
//! - **`shared`** - Wire-level types (conversations, messages, socket
//!   events, validation errors)
//! - **`backend`** - The Axum server: stores, resolver, hub, gateway,
//!   routes, state, configuration
//!
//! # Usage
//!
//! ```rust,no_run
//! use talkwire::backend::server::init::create_app;
//!
//! # async fn example() {
//! let (app, config) = create_app().await;
//! // Serve `app` with Axum on `config.port`
//! # }
//! ```

/// Types shared between the wire surface and the backend
pub mod shared;

/// Server-side code
pub mod backend;
