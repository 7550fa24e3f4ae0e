//! Handler functions for authentication-related API endpoints.
//!
//! These handlers parse and validate request payloads, call into
//! [`AuthService`](super::service::AuthService) for the actual work, and
//! manage the auth cookies. Cookies are httpOnly, SameSite=Strict, and
//! `Secure` in production; logout clears them client-side only — an
//! access token captured before logout stays valid until its own expiry,
//! since there is no server-side revocation list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use super::errors::AuthError;
use super::middleware::AuthUser;
use super::models::{
    LoginRequest, LoginResponse, RefreshResponse, RegisterRequest, SessionUser, TokenKind,
};
use crate::errors::ApiError;
use crate::state::AppState;

fn auth_cookie(
    kind: TokenKind,
    value: String,
    max_age_secs: u64,
    production: bool,
) -> Cookie<'static> {
    Cookie::build((kind.cookie_name(), value))
        .http_only(true)
        .secure(production)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs as i64))
        .build()
}

fn expired_cookie(kind: TokenKind) -> Cookie<'static> {
    Cookie::build((kind.cookie_name(), ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

fn session_cookies(
    state: &AppState,
    jar: CookieJar,
    access: String,
    refresh: String,
) -> CookieJar {
    let keys = state.auth.keys();
    jar.add(auth_cookie(
        TokenKind::Access,
        access,
        keys.access_ttl_seconds(),
        state.config.production,
    ))
    .add(auth_cookie(
        TokenKind::Refresh,
        refresh,
        keys.refresh_ttl_seconds(),
        state.config.production,
    ))
}

/// POST /api/auth/register — self-registration, USER tier only.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>), ApiError> {
    payload.validate()?;
    let user = state
        .auth
        .register(&payload.email, &payload.name, &payload.password)
        .await?;
    let keys = state.auth.keys();
    let access = keys.issue(&user, TokenKind::Access)?;
    let refresh = keys.issue(&user, TokenKind::Refresh)?;
    let expires_in = keys.access_ttl_seconds();
    let jar = session_cookies(&state, jar, access.clone(), refresh.clone());
    Ok((
        StatusCode::CREATED,
        jar,
        Json(LoginResponse {
            access_token: access,
            refresh_token: refresh,
            user: user.into(),
            expires_in,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    payload.validate()?;
    let user = state.auth.login(&payload.email, &payload.password).await?;
    let keys = state.auth.keys();
    let access = keys.issue(&user, TokenKind::Access)?;
    let refresh = keys.issue(&user, TokenKind::Refresh)?;
    let expires_in = keys.access_ttl_seconds();
    let jar = session_cookies(&state, jar, access.clone(), refresh.clone());
    Ok((
        jar,
        Json(LoginResponse {
            access_token: access,
            refresh_token: refresh,
            user: user.into(),
            expires_in,
        }),
    ))
}

/// POST /api/auth/refresh — the refresh token is read from its cookie
/// only, never from the Authorization header, to limit exposure.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<RefreshResponse>), ApiError> {
    let token = jar
        .get(TokenKind::Refresh.cookie_name())
        .map(|c| c.value().to_string())
        .ok_or(AuthError::NoCredential)?;
    let (access, user) = state.auth.refresh(&token).await?;
    let keys = state.auth.keys();
    let expires_in = keys.access_ttl_seconds();
    let jar = jar.add(auth_cookie(
        TokenKind::Access,
        access.clone(),
        expires_in,
        state.config.production,
    ));
    Ok((
        jar,
        Json(RefreshResponse {
            access_token: access,
            user: user.into(),
            expires_in,
        }),
    ))
}

/// POST /api/auth/logout — clears both cookies by re-setting them with
/// max-age zero.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar
        .add(expired_cookie(TokenKind::Access))
        .add(expired_cookie(TokenKind::Refresh));
    (jar, StatusCode::NO_CONTENT)
}

/// GET /api/auth/me — re-confirms the principal still exists and returns
/// its current stored attributes, not the (possibly stale) claims.
pub async fn me(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SessionUser>, ApiError> {
    let user = state.auth.current_user(&claims).await?;
    Ok(Json(user.into()))
}
