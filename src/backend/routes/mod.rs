//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports and documentation
//! ├── router.rs      - Main router creation
//! └── chat_routes.rs - Conversation and message routes
//! ```

/// Main router creation
pub mod router;

/// Conversation and message routes
pub mod chat_routes;

// Re-export commonly used functions
pub use router::create_router;
