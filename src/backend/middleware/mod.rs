//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//! Middleware functions process requests before they reach handlers.
//!
//! - **`auth`** - Principal extraction for protected routes

pub mod auth;

pub use auth::{principal_middleware, AuthUser, Principal};
