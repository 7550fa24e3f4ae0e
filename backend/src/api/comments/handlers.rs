//! Handler functions for the comment API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::errors::AuthError;
use crate::auth::middleware::AuthUser;
use crate::auth::models::Role;
use crate::database::models::Comment;
use crate::database::queries;
use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentPayload {
    pub article_id: Uuid,
    #[validate(length(min = 1, max = 4000, message = "Comment body must be 1-4000 characters"))]
    pub body: String,
}

/// GET /api/comments/article/{article_id} — public, oldest first.
pub async fn list_for_article(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    // 404 for unknown articles rather than an empty list.
    queries::find_article_by_id(&state.pool, article_id)
        .await?
        .ok_or(ApiError::NotFound("article"))?;
    let comments = queries::list_comments_for_article(&state.pool, article_id).await?;
    Ok(Json(comments))
}

/// POST /api/comments — any authenticated user, published articles only.
pub async fn create(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CommentPayload>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    payload.validate()?;
    let author_id = claims.user_id().map_err(|_| AuthError::InvalidToken)?;
    let article = queries::find_article_by_id(&state.pool, payload.article_id)
        .await?
        .ok_or(ApiError::NotFound("article"))?;
    if !article.published {
        return Err(ApiError::NotFound("article"));
    }
    let comment =
        queries::insert_comment(&state.pool, payload.article_id, author_id, &payload.body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/{id} — the comment's author or an admin.
pub async fn remove(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let comment = queries::find_comment(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("comment"))?;
    let caller = claims.user_id().map_err(|_| AuthError::InvalidToken)?;
    if comment.author_id != caller && claims.role != Role::Admin {
        return Err(AuthError::InsufficientRole {
            required: Role::Admin,
            actual: claims.role,
        }
        .into());
    }
    queries::delete_comment(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
