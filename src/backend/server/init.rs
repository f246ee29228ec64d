//! Server Initialization
//!
//! This module handles the initialization and setup of the Axum HTTP
//! server: configuration loading, state creation, route configuration,
//! and the periodic room-cleanup task.
//!
//! # Initialization Process
//!
//! 1. Load configuration from the environment
//! 2. Connect the optional database and run migrations
//! 3. Create the application state (pool, room hub, config)
//! 4. Spawn the periodic cleanup task for abandoned rooms
//! 5. Build the router
//!
//! The function is designed to be resilient: a missing database disables
//! persistence-backed routes instead of preventing startup.

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// How often abandoned rooms are swept out of the hub
const ROOM_CLEANUP_INTERVAL_SECS: u64 = 300;

/// Create and configure the Axum application
pub async fn create_app() -> (Router, ServerConfig) {
    tracing::info!("Initializing talkwire server");

    let config = ServerConfig::from_env();
    let db_pool = load_database().await;

    let app_state = AppState::new(db_pool, config.clone());

    // Rooms whose last member disconnected linger in the hub's table until
    // this sweep removes them.
    let cleanup_hub = app_state.hub.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(ROOM_CLEANUP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            cleanup_hub.cleanup_inactive();
            tracing::debug!("Swept inactive rooms, {} remaining", cleanup_hub.room_count());
        }
    });

    let app = create_router(app_state);
    tracing::info!("Router configured");

    (app, config)
}
