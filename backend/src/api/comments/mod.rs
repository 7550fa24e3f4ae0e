//! Module for the comment API.
//!
//! Public listing per article, posting by any signed-in user, and
//! deletion by the comment's owner or an admin.

pub mod handlers;
pub mod routes;
