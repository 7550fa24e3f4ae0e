//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the per-resource API
//! domains (articles, comments, users, categories, pages), excluding core
//! authentication routes which are handled separately.

pub mod articles;
pub mod categories;
pub mod comments;
pub mod pages;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/articles", articles::routes::router())
        .nest("/comments", comments::routes::router())
        .nest("/users", users::routes::router())
        .nest("/categories", categories::routes::router())
        .nest("/pages", pages::routes::router())
}
