//! Principal Extraction Middleware
//!
//! Authentication itself is owned by the upstream identity layer, which
//! verifies credentials and forwards the authenticated user id and role in
//! the `x-user-id` / `x-user-role` headers. This middleware trusts those
//! headers, parses them, and attaches the principal to request extensions
//! for handlers.
//!
//! Returns 401 Unauthorized if the principal header is missing or malformed.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Authenticated principal asserted by the upstream identity layer
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: String,
}

/// Principal-extraction middleware
///
/// This middleware:
/// 1. Reads the `x-user-id` header asserted upstream
/// 2. Parses it into a user id
/// 3. Attaches a `Principal` to request extensions for use in handlers
pub async fn principal_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user_header = request
        .headers()
        .get("x-user-id")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing x-user-id header");
            StatusCode::UNAUTHORIZED
        })?;

    let user_id = Uuid::parse_str(user_header).map_err(|e| {
        tracing::warn!("[Auth] Invalid x-user-id header: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    let role = request
        .headers()
        .get("x-user-role")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("user")
        .to_string();

    request.extensions_mut().insert(Principal { user_id, role });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated principal
///
/// This can be used as a parameter in handlers to automatically extract
/// the principal set by `principal_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Principal);

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("[Auth] Principal not found in request extensions");
                StatusCode::UNAUTHORIZED
            })?;

        Ok(AuthUser(principal))
    }
}
