//! Router Configuration
//!
//! This module provides the main router creation function that combines
//! all route configurations into a single Axum router.
//!
//! # Route Order
//!
//! 1. Chat routes and the socket upgrade, behind the principal middleware
//! 2. The public health route
//! 3. CORS layer and the 404 fallback

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::backend::middleware::auth::principal_middleware;
use crate::backend::realtime::ws::chat_socket;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    // Everything except the health banner requires a principal asserted by
    // the upstream identity layer.
    let protected = configure_chat_routes(Router::new())
        .route("/ws", get(chat_socket))
        .layer(middleware::from_fn(principal_middleware));

    let router = Router::new()
        .merge(protected)
        .route("/", get(health))
        .layer(cors_layer(&app_state.config))
        .fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}

/// Root health banner
async fn health() -> &'static str {
    "talkwire chat service"
}

/// Mirror the upstream deployment's CORS policy: explicit origins when
/// configured, permissive for local development otherwise.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-user-id"),
            HeaderName::from_static("x-user-role"),
        ]);

    if config.cors_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
