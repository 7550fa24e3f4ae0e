//! Module for the article API.
//!
//! Public listing and slug lookup of published articles, plus the editor
//! back office (drafts, create, update, delete).

pub mod handlers;
pub mod routes;
