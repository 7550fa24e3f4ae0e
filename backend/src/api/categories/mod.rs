//! Module for the category API.
//!
//! Public listing; admin-only mutation.

pub mod handlers;
pub mod routes;
