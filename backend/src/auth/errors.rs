//! Custom error types specific to authentication failures.
//!
//! The taxonomy keeps the distinctions callers must branch on without
//! string parsing: missing credential vs bad credential (both 401),
//! insufficient role (403), and storage trouble during role
//! re-confirmation (503, never conflated with a denial).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::models::Role;
use crate::errors::ErrorBody;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer header and no recognized cookie on the request.
    #[error("no credential presented")]
    NoCredential,

    /// Malformed, unsigned, signed with a different secret, or missing a
    /// required claim. Deliberately a single bucket so callers cannot
    /// distinguish a forged token from one referencing a deleted claim.
    #[error("invalid credential")]
    InvalidToken,

    #[error("credential expired")]
    TokenExpired,

    #[error("invalid email or password")]
    InvalidCredentials,

    /// Credential verified but the role is below the route's minimum.
    #[error("requires {required} role")]
    InsufficientRole { required: Role, actual: Role },

    /// The token verified but the account behind it no longer exists.
    /// Surfaced as 401 so a deleted account is indistinguishable from a
    /// forged token to the caller.
    #[error("invalid credential")]
    PrincipalNotFound,

    /// The credential store could not be reached while re-confirming the
    /// principal. An infrastructure failure, not an access decision.
    #[error("credential store unavailable")]
    StoreUnavailable(#[source] sqlx::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::NoCredential
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::InvalidCredentials
            | AuthError::PrincipalNotFound => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
            AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::StoreUnavailable(ref source) = self {
            tracing::error!(error = %source, "credential store unavailable");
        }
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_bad_credentials_are_unauthorized() {
        assert_eq!(AuthError::NoCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::PrincipalNotFound.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn insufficient_role_is_forbidden_not_unauthorized() {
        let err = AuthError::InsufficientRole {
            required: Role::Admin,
            actual: Role::User,
        };
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn storage_failure_is_not_reported_as_denial() {
        let err = AuthError::StoreUnavailable(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn deleted_principal_reads_like_invalid_token() {
        assert_eq!(
            AuthError::PrincipalNotFound.to_string(),
            AuthError::InvalidToken.to_string()
        );
    }
}
