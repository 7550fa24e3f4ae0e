//! Defines the HTTP routes for the comment API.

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create))
        .route("/article/{article_id}", get(handlers::list_for_article))
        .route("/{id}", axum::routing::delete(handlers::remove))
}
