//! Module for the static page API.
//!
//! Public slug lookup; editor-managed content.

pub mod handlers;
pub mod routes;
