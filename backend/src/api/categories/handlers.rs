//! Handler functions for the category API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AdminUser;
use crate::database::models::Category;
use crate::database::{is_unique_violation, queries};
use crate::errors::ApiError;
use crate::state::AppState;
use crate::utils::slugify;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// GET /api/categories — public.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = queries::list_categories(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    payload.validate()?;
    let slug = slugify(&payload.name);
    let category = queries::insert_category(&state.pool, &slug, &payload.name)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(format!("a category with slug '{slug}' already exists"))
            } else {
                ApiError::Database(e)
            }
        })?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
pub async fn update(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>, ApiError> {
    payload.validate()?;
    let slug = slugify(&payload.name);
    let category = queries::update_category(&state.pool, id, &slug, &payload.name)
        .await?
        .ok_or(ApiError::NotFound("category"))?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
pub async fn remove(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if queries::delete_category(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("category"))
    }
}
