//! Handler functions for the static page API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::EditorUser;
use crate::database::models::Page;
use crate::database::{is_unique_violation, queries};
use crate::errors::ApiError;
use crate::state::AppState;
use crate::utils::slugify;

#[derive(Debug, Deserialize, Validate)]
pub struct PagePayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
}

/// GET /api/pages — editor back office listing.
pub async fn list(
    EditorUser(_): EditorUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Page>>, ApiError> {
    let pages = queries::list_pages(&state.pool).await?;
    Ok(Json(pages))
}

/// GET /api/pages/{slug} — public.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Page>, ApiError> {
    let page = queries::find_page_by_slug(&state.pool, &slug)
        .await?
        .ok_or(ApiError::NotFound("page"))?;
    Ok(Json(page))
}

/// POST /api/pages
pub async fn create(
    EditorUser(_): EditorUser,
    State(state): State<AppState>,
    Json(payload): Json<PagePayload>,
) -> Result<(StatusCode, Json<Page>), ApiError> {
    payload.validate()?;
    let slug = slugify(&payload.title);
    if slug.is_empty() {
        return Err(ApiError::Validation("title produces an empty slug".into()));
    }
    let page = queries::insert_page(&state.pool, &slug, &payload.title, &payload.body)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(format!("a page with slug '{slug}' already exists"))
            } else {
                ApiError::Database(e)
            }
        })?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// PUT /api/pages/{id}
pub async fn update(
    EditorUser(_): EditorUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PagePayload>,
) -> Result<Json<Page>, ApiError> {
    payload.validate()?;
    let page = queries::update_page(&state.pool, id, &payload.title, &payload.body)
        .await?
        .ok_or(ApiError::NotFound("page"))?;
    Ok(Json(page))
}

/// DELETE /api/pages/{id}
pub async fn remove(
    EditorUser(_): EditorUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if queries::delete_page(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("page"))
    }
}
