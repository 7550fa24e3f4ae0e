//! Handler functions for the article API.
//!
//! Read endpoints are public and only ever see published articles; the
//! editor-facing endpoints (draft listing and all mutations) sit behind
//! the EDITOR guard.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::errors::AuthError;
use crate::auth::middleware::EditorUser;
use crate::database::models::Article;
use crate::database::{is_unique_violation, queries};
use crate::errors::ApiError;
use crate::state::AppState;
use crate::utils::slugify;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ArticlePayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub excerpt: Option<String>,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
    pub cover_image: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub published: bool,
}

/// GET /api/articles — published articles, newest first.
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = queries::list_published_articles(
        &state.pool,
        params.category.as_deref(),
        params.limit(),
        params.offset(),
    )
    .await?;
    Ok(Json(articles))
}

/// GET /api/articles/all — drafts included, editor back office.
pub async fn list_all(
    EditorUser(_): EditorUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = queries::list_all_articles(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(articles))
}

/// GET /api/articles/{slug} — published articles only.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let article = queries::find_published_article_by_slug(&state.pool, &slug)
        .await?
        .ok_or(ApiError::NotFound("article"))?;
    Ok(Json(article))
}

/// POST /api/articles
pub async fn create(
    EditorUser(claims): EditorUser,
    State(state): State<AppState>,
    Json(payload): Json<ArticlePayload>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    payload.validate()?;
    let author_id = claims.user_id().map_err(|_| AuthError::InvalidToken)?;
    let slug = slugify(&payload.title);
    if slug.is_empty() {
        return Err(ApiError::Validation("title produces an empty slug".into()));
    }
    let article = queries::insert_article(
        &state.pool,
        &slug,
        &payload.title,
        payload.excerpt.as_deref(),
        &payload.body,
        payload.cover_image.as_deref(),
        payload.category_id,
        author_id,
        payload.published,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict(format!("an article with slug '{slug}' already exists"))
        } else {
            ApiError::Database(e)
        }
    })?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /api/articles/{id}
pub async fn update(
    EditorUser(_): EditorUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArticlePayload>,
) -> Result<Json<Article>, ApiError> {
    payload.validate()?;
    let article = queries::update_article(
        &state.pool,
        id,
        &payload.title,
        payload.excerpt.as_deref(),
        &payload.body,
        payload.cover_image.as_deref(),
        payload.category_id,
        payload.published,
    )
    .await?
    .ok_or(ApiError::NotFound("article"))?;
    Ok(Json(article))
}

/// DELETE /api/articles/{id}
pub async fn remove(
    EditorUser(_): EditorUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if queries::delete_article(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("article"))
    }
}
