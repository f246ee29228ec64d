//! Application State Management
//!
//! This module defines the application state structure and implements the
//! `FromRef` traits for Axum state extraction.
//!
//! # Thread Safety
//!
//! All state is designed to be shared across handlers:
//! - `Option<PgPool>` is cloneable and internally pooled
//! - `RoomHub` clones share the same room table
//! - `ServerConfig` is plain immutable data
//!
//! # State Extraction
//!
//! The `FromRef` implementations allow handlers to extract specific parts
//! of the state without needing the entire `AppState`, following Axum's
//! recommended pattern.

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::realtime::hub::RoomHub;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db_pool` - Optional PostgreSQL pool; `None` if the database is not
///   configured, in which case persistence-backed routes answer 503
/// * `hub` - Per-conversation broadcast rooms for live fan-out
/// * `config` - Server configuration (heartbeat timings, CORS, port)
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: Option<PgPool>,

    /// Room fan-out hub; process-local, never durable
    pub hub: RoomHub,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Build a state container from already-loaded parts
    pub fn new(db_pool: Option<PgPool>, config: ServerConfig) -> Self {
        Self {
            db_pool,
            hub: RoomHub::new(),
            config,
        }
    }
}

/// Allow handlers to take `State<Option<PgPool>>` directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to take `State<RoomHub>` directly
impl FromRef<AppState> for RoomHub {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hub.clone()
    }
}

/// Allow handlers to take `State<ServerConfig>` directly
impl FromRef<AppState> for ServerConfig {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
