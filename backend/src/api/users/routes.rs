//! Defines the HTTP routes for the admin user management API.

use axum::routing::{delete, get, put};
use axum::Router;

use super::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list).post(handlers::create))
        .route("/{id}/role", put(handlers::update_role))
        .route("/{id}", delete(handlers::remove))
}
