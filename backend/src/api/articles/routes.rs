//! Defines the HTTP routes for the article API.
//!
//! The trailing path segment is a slug for public reads and an article id
//! for editor mutations.

use axum::routing::get;
use axum::Router;

use super::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_published).post(handlers::create))
        .route("/all", get(handlers::list_all))
        .route(
            "/{key}",
            get(handlers::get_by_slug)
                .put(handlers::update)
                .delete(handlers::remove),
        )
}
