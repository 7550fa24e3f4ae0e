//! Defines the HTTP routes for the category API.

use axum::routing::get;
use axum::Router;

use super::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list).post(handlers::create))
        .route(
            "/{id}",
            axum::routing::put(handlers::update).delete(handlers::remove),
        )
}
