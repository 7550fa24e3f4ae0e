//! Core business logic for the authentication system.
//!
//! Token issuance and verification are pure functions of (claims, clock,
//! secret); the only database work is credential lookup at login and the
//! role re-confirmation during refresh. Nothing here caches state across
//! requests.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use tracing::info;

use super::errors::AuthError;
use super::models::{Claims, Role, TokenKind};
use crate::config::Config;
use crate::database::models::User;
use crate::database::{is_unique_violation, queries};
use crate::errors::ApiError;

/// Signing and verification keys derived from the shared secret, plus the
/// per-kind lifetimes. Built once at startup.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, access_ttl_minutes: i64, refresh_ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_ttl_minutes),
            refresh_ttl: Duration::days(refresh_ttl_days),
        }
    }

    pub fn access_ttl_seconds(&self) -> u64 {
        self.access_ttl.num_seconds().max(0) as u64
    }

    pub fn refresh_ttl_seconds(&self) -> u64 {
        self.refresh_ttl.num_seconds().max(0) as u64
    }

    /// Signs a token for `user` with the lifetime of `kind`. Claims carry
    /// the public attributes only, with the role as stored right now.
    pub fn issue(&self, user: &User, kind: TokenKind) -> Result<String, AuthError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: Some(user.name.clone()),
            role: user.role,
            image: user.image.clone(),
            kind,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::InvalidToken)
    }

    /// Verifies signature, expiry, and token flavor, returning the typed
    /// claims.
    ///
    /// Expired and malformed are distinct variants; anything else a
    /// caller could learn (wrong secret, missing claim, wrong flavor,
    /// garbage) collapses into `InvalidToken`. Zero leeway: a token one
    /// second past `exp` is already rejected. The kind check means an
    /// access token cannot be replayed through the refresh endpoint,
    /// nor a refresh token used as a bearer credential.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;
        if claims.kind != expected {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }
}

/// Orchestrates registration, login, and the refresh flow.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    keys: TokenKeys,
}

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ApiError::Internal(format!("could not hash password: {e}")))
}

fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

impl AuthService {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            keys: TokenKeys::new(
                &config.jwt_secret,
                config.access_ttl_minutes,
                config.refresh_ttl_days,
            ),
        }
    }

    pub fn keys(&self) -> &TokenKeys {
        &self.keys
    }

    /// Self-registration. Always creates a USER-tier principal; elevated
    /// roles are only handed out through the admin user API.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<User, ApiError> {
        let hash = hash_password(password)?;
        let user = queries::insert_user(&self.pool, email, name, Some(&hash), Role::User)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("email already registered".into())
                } else {
                    ApiError::Database(e)
                }
            })?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verifies credentials and returns the principal. The error is the
    /// same whether the email is unknown or the password wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let user = queries::find_user_by_email(&self.pool, email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        let stored = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, stored)?;
        info!(user_id = %user.id, "Login successful");
        Ok(user)
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The principal's role is re-read from storage so a promotion or
    /// demotion since issuance shows up in the new token. A deleted
    /// account fails as `PrincipalNotFound`; an unreachable store is an
    /// infrastructure failure, never a denial.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(String, User), AuthError> {
        let claims = self.keys.verify(refresh_token, TokenKind::Refresh)?;
        let id = claims.user_id().map_err(|_| AuthError::InvalidToken)?;
        let outcome = queries::find_user_by_id(&self.pool, id).await;
        let (access, user) = mint_refreshed_access(&self.keys, outcome)?;
        info!(user_id = %user.id, "Access token refreshed");
        Ok((access, user))
    }

    /// Confirms the access token's principal still exists and returns it.
    pub async fn current_user(&self, claims: &Claims) -> Result<User, AuthError> {
        let id = claims.user_id().map_err(|_| AuthError::InvalidToken)?;
        queries::find_user_by_id(&self.pool, id)
            .await
            .map_err(AuthError::StoreUnavailable)?
            .ok_or(AuthError::PrincipalNotFound)
    }
}

/// Turns the principal lookup outcome into a fresh access token.
///
/// The three branches carry distinct meanings: a store failure is 503
/// infrastructure trouble, a missing row means the account was deleted
/// after the refresh token was issued, and a found row gets a token
/// carrying the role as stored now, not as it was at issuance.
fn mint_refreshed_access(
    keys: &TokenKeys,
    lookup: Result<Option<User>, sqlx::Error>,
) -> Result<(String, User), AuthError> {
    let user = lookup
        .map_err(AuthError::StoreUnavailable)?
        .ok_or(AuthError::PrincipalNotFound)?;
    let access = keys.issue(&user, TokenKind::Access)?;
    Ok((access, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn keys(secret: &str) -> TokenKeys {
        TokenKeys::new(secret, 15, 7)
    }

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "reporter@example.com".into(),
            name: "Reporter".into(),
            password_hash: None,
            role,
            image: None,
            phone: None,
            reputation: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips_with_stored_role() {
        let keys = keys("test-secret");
        let user = user(Role::Editor);
        let token = keys.issue(&user, TokenKind::Access).unwrap();
        let claims = keys.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Editor);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected_even_with_valid_signature() {
        let keys = keys("test-secret");
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "u1".into(),
            email: "a@b.c".into(),
            name: None,
            role: Role::User,
            image: None,
            kind: TokenKind::Access,
            iat: now - 16 * 60,
            exp: now - 60, // expired a minute ago
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(
            keys.verify(&token, TokenKind::Access),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_never_verifies() {
        let signer = keys("secret-a");
        let verifier = keys("secret-b");
        let token = signer.issue(&user(Role::Admin), TokenKind::Access).unwrap();
        assert!(matches!(
            verifier.verify(&token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn payload_without_role_is_invalid_despite_signature() {
        #[derive(serde::Serialize)]
        struct Roleless {
            sub: String,
            email: String,
            kind: String,
            iat: usize,
            exp: usize,
        }
        let now = Utc::now().timestamp() as usize;
        let token = encode(
            &Header::default(),
            &Roleless {
                sub: "u1".into(),
                email: "a@b.c".into(),
                kind: "access".into(),
                iat: now,
                exp: now + 900,
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(
            keys("test-secret").verify(&token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_invalid_not_a_panic() {
        let keys = keys("test-secret");
        assert!(matches!(
            keys.verify("", TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            keys.verify("not.a.token", TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn refresh_tokens_outlive_access_tokens() {
        let keys = keys("test-secret");
        let user = user(Role::User);
        let access = keys
            .verify(&keys.issue(&user, TokenKind::Access).unwrap(), TokenKind::Access)
            .unwrap();
        let refresh = keys
            .verify(&keys.issue(&user, TokenKind::Refresh).unwrap(), TokenKind::Refresh)
            .unwrap();
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn token_of_one_kind_never_verifies_as_the_other() {
        let keys = keys("test-secret");
        let user = user(Role::User);
        let access = keys.issue(&user, TokenKind::Access).unwrap();
        let refresh = keys.issue(&user, TokenKind::Refresh).unwrap();
        assert!(matches!(
            keys.verify(&access, TokenKind::Refresh),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            keys.verify(&refresh, TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn refreshed_access_token_carries_the_stored_role() {
        // Promoted since the refresh token was issued: the new access
        // token must carry the role as stored now.
        let keys = keys("test-secret");
        let mut principal = user(Role::User);
        principal.role = Role::Editor;
        let (access, returned) =
            mint_refreshed_access(&keys, Ok(Some(principal.clone()))).unwrap();
        let claims = keys.verify(&access, TokenKind::Access).unwrap();
        assert_eq!(claims.role, Role::Editor);
        assert_eq!(returned.id, principal.id);
    }

    #[test]
    fn refresh_for_deleted_account_is_principal_not_found() {
        let keys = keys("test-secret");
        assert!(matches!(
            mint_refreshed_access(&keys, Ok(None)),
            Err(AuthError::PrincipalNotFound)
        ));
    }

    #[test]
    fn refresh_store_failure_is_unavailable_not_a_denial() {
        let keys = keys("test-secret");
        assert!(matches!(
            mint_refreshed_access(&keys, Err(sqlx::Error::PoolTimedOut)),
            Err(AuthError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(verify_password("wrong", &hash).is_err());
    }
}
