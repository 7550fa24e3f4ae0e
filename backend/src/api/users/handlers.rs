//! Handler functions for the admin user management API.
//!
//! Every endpoint here requires the ADMIN tier. Role changes take effect
//! on the next token issuance or refresh; outstanding access tokens keep
//! their old role claim until they expire.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AdminUser;
use crate::auth::models::{Role, SessionUser};
use crate::auth::service::hash_password;
use crate::database::{is_unique_violation, queries};
use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Absent for accounts that sign in through an external identity
    /// provider; such rows carry no password hash.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// GET /api/users
pub async fn list(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionUser>>, ApiError> {
    let users = queries::list_users(&state.pool).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /api/users — admin-initiated creation, any role.
pub async fn create(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<SessionUser>), ApiError> {
    payload.validate()?;
    let hash = payload.password.as_deref().map(hash_password).transpose()?;
    let user = queries::insert_user(
        &state.pool,
        &payload.email,
        &payload.name,
        hash.as_deref(),
        payload.role,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("email already registered".into())
        } else {
            ApiError::Database(e)
        }
    })?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users/{id}/role
pub async fn update_role(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<SessionUser>, ApiError> {
    let user = queries::update_user_role(&state.pool, id, payload.role)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into()))
}

/// DELETE /api/users/{id}
pub async fn remove(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if queries::delete_user(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("user"))
    }
}
