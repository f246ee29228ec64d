//! Backend Module
//!
//! This module contains all server-side code for the talkwire chat
//! service: an Axum HTTP server exposing conversation and message
//! endpoints plus a WebSocket channel for live fan-out.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - Conversation/message stores, resolver, HTTP handlers
//! - **`realtime`** - Room hub and the WebSocket session gateway
//! - **`middleware`** - Principal extraction
//! - **`error`** - Backend error types
//!
//! # Data Flow
//!
//! A send request persists the message through the chat store, then hands
//! the persisted message to the realtime hub, which fans it out to every
//! connection currently joined to the conversation's room. Persistence is
//! the precondition for fan-out; fan-out is best-effort notification.
//!
//! # Thread Safety
//!
//! Shared state is the database pool (internally pooled) and the hub's
//! room table (`Arc<Mutex<..>>` around per-room broadcast senders). Both
//! are cheap to clone into handlers.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Conversation and message functionality
pub mod chat;

/// Realtime fan-out system
pub mod realtime;

/// Backend error types
pub mod error;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use error::ChatError;
pub use realtime::RoomHub;
pub use server::{create_app, AppState, ServerConfig};
