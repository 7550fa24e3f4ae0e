//! Authentication module for managing user accounts, sessions, and access control.
//!
//! This module provides the public interface for authentication-related
//! functionality: login, registration, token issuance and refresh, and the
//! role-gated guard extractors used by every protected route.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::AuthError;
pub use middleware::{AdminUser, AuthUser, EditorUser};
pub use models::{Claims, Role, TokenKind};
pub use service::{AuthService, TokenKeys};
