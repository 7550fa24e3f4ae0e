//! Global application error types and handlers.
//!
//! Every failure leaving the API uses one envelope:
//! `{"error": true, "message": "..."}`. Handlers return [`ApiError`] and
//! let `IntoResponse` pick the status; auth failures keep their own
//! status mapping from [`AuthError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::errors::AuthError;

/// The single error envelope used by every route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Server-side failures that are not database errors, such as a
    /// password hasher refusing its parameters. The detail is logged,
    /// never sent to the client.
    #[error("internal error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(auth) => auth.status(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Database(ref source) => tracing::error!(error = %source, "database error"),
            ApiError::Internal(ref detail) => tracing::error!(error = %detail, "internal error"),
            _ => {}
        }
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::NotFound("article").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Conflict("email already registered".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("hasher failed".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn auth_errors_keep_their_status() {
        let err = ApiError::Auth(AuthError::NoCredential);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn internal_detail_is_not_leaked_to_the_client() {
        let err = ApiError::Internal("argon2 rejected its parameters".into());
        assert_eq!(err.to_string(), "internal error");
    }

    #[test]
    fn envelope_shape() {
        let body = serde_json::to_value(ErrorBody::new("nope")).unwrap();
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "nope");
    }
}
