//! Defines the HTTP routes for the static page API.
//!
//! The trailing segment is a slug for public reads and a page id for
//! editor mutations.

use axum::routing::get;
use axum::Router;

use super::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list).post(handlers::create))
        .route(
            "/{key}",
            get(handlers::get_by_slug)
                .put(handlers::update)
                .delete(handlers::remove),
        )
}
