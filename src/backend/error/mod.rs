//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Taxonomy
//!
//! - `Validation` - malformed input, surfaced as a client error
//! - `NotFound` - missing or soft-deleted resource
//! - `DuplicateConversation` - lost create race; recovered by the resolver
//! - `PersistenceUnavailable` - store not configured or unreachable
//! - `Database` / `Serialization` - unexpected server-side failures
//!
//! All variants implement `IntoResponse`, so handlers can return
//! `Result<_, ChatError>` and propagate with `?`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ChatError;
