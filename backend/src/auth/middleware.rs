//! Middleware for protecting authenticated routes and handling authorization.
//!
//! A guard is the composition of token location, verification, and the
//! role decision table. It runs entirely before the handler and never
//! touches the database: every rejection is a structured [`AuthError`]
//! (401 for missing/bad credential, 403 for a valid credential below the
//! route's minimum tier) converted to the error envelope at the boundary.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;

use super::errors::AuthError;
use super::models::{Claims, Role, TokenKind};
use crate::state::AppState;

/// Locates a candidate access token: the `Authorization: Bearer` header
/// wins, then the canonical access cookie. Returns the first candidate
/// found; never fails. Refresh tokens are deliberately not resolved here
/// — the refresh endpoint reads its cookie itself.
pub fn resolve_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    CookieJar::from_headers(headers)
        .get(TokenKind::Access.cookie_name())
        .map(|cookie| cookie.value().to_string())
}

/// The role decision: valid credential below the minimum tier is a 403,
/// never a 401.
pub fn check_role(claims: &Claims, required: Role) -> Result<(), AuthError> {
    if claims.role.permits(required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole {
            required,
            actual: claims.role,
        })
    }
}

fn authorize(parts: &Parts, state: &AppState, required: Role) -> Result<Claims, AuthError> {
    let token = resolve_token(&parts.headers).ok_or(AuthError::NoCredential)?;
    let claims = state.auth.keys().verify(&token, TokenKind::Access)?;
    check_role(&claims, required)?;
    Ok(claims)
}

/// Any authenticated principal.
pub struct AuthUser(pub Claims);

/// EDITOR minimum; ADMIN passes by the explicit grant in [`Role::permits`].
pub struct EditorUser(pub Claims);

/// ADMIN only.
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        authorize(parts, &state, Role::User).map(AuthUser)
    }
}

impl<S> FromRequestParts<S> for EditorUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        authorize(parts, &state, Role::Editor).map(EditorUser)
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        authorize(parts, &state, Role::Admin).map(AdminUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.append(
                k.parse::<axum::http::HeaderName>().unwrap(),
                HeaderValue::from_str(v).unwrap(),
            );
        }
        map
    }

    fn claims(role: Role) -> Claims {
        Claims {
            sub: "u1".into(),
            email: "a@b.c".into(),
            name: None,
            role,
            image: None,
            kind: TokenKind::Access,
            iat: 0,
            exp: usize::MAX,
        }
    }

    #[test]
    fn bearer_header_takes_priority_over_cookie() {
        let headers = headers(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "pw_access=from-cookie"),
        ]);
        assert_eq!(resolve_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn falls_back_to_access_cookie() {
        let headers = headers(&[("cookie", "other=x; pw_access=from-cookie")]);
        assert_eq!(resolve_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn refresh_cookie_is_never_picked_up() {
        let headers = headers(&[("cookie", "pw_refresh=refresh-token")]);
        assert_eq!(resolve_token(&headers), None);
    }

    #[test]
    fn no_credential_resolves_to_none() {
        assert_eq!(resolve_token(&HeaderMap::new()), None);
    }

    #[test]
    fn empty_bearer_value_is_not_a_candidate() {
        let headers = headers(&[("authorization", "Bearer ")]);
        assert_eq!(resolve_token(&headers), None);
    }

    #[test]
    fn user_against_admin_gate_is_forbidden() {
        let err = check_role(&claims(Role::User), Role::Admin).unwrap_err();
        assert!(matches!(err, AuthError::InsufficientRole { .. }));
        assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn admin_passes_editor_gate() {
        assert!(check_role(&claims(Role::Admin), Role::Editor).is_ok());
    }

    #[test]
    fn editor_fails_admin_gate() {
        assert!(check_role(&claims(Role::Editor), Role::Admin).is_err());
    }
}
