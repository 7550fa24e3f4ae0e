//! Module for user management API endpoints.
//!
//! Admin back office: listing accounts, creating accounts at any tier,
//! changing roles, and deleting accounts. Self-service profile access
//! lives under `/api/auth/me`.

pub mod handlers;
pub mod routes;
