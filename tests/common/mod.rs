//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests: an app builder
//! wired without a database (persistence-backed routes answer 503) and a
//! principal header helper.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use talkwire::backend::server::config::ServerConfig;
use talkwire::backend::server::state::AppState;
use uuid::Uuid;

/// Application state with no database configured
pub fn test_state() -> AppState {
    AppState::new(None, ServerConfig::default())
}

/// Test server over the full router, sharing the given state
pub fn test_server(state: AppState) -> TestServer {
    let app = talkwire::backend::routes::router::create_router(state);
    TestServer::new(app).expect("failed to start test server")
}

/// The header pair the upstream identity layer would assert
pub fn principal_header(user_id: Uuid) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_str(&user_id.to_string()).unwrap(),
    )
}
