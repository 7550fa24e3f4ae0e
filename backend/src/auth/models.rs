//! Data structures for authentication-related entities.
//!
//! This module defines the role enumeration, the JWT claims carried by
//! access and refresh tokens, and the request/response payloads used by
//! the authentication endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::models::User;

/// Authorization tier of a principal.
///
/// Stored uppercase in the database and in token claims. Parsing is
/// case-insensitive so that legacy rows written with mixed casing still
/// resolve to exactly one tier; unknown values are rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Editor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Editor => "EDITOR",
            Role::Admin => "ADMIN",
        }
    }

    /// Whether a principal holding `self` may pass a gate requiring
    /// `required` as the minimum tier.
    ///
    /// Each grant is an explicit arm rather than a numeric comparison:
    /// ADMIN passes EDITOR gates because the product says so, and a
    /// minimum of USER admits any authenticated principal.
    pub fn permits(self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Editor => matches!(self, Role::Editor | Role::Admin),
            Role::Admin => matches!(self, Role::Admin),
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("USER") {
            Ok(Role::User)
        } else if s.eq_ignore_ascii_case("EDITOR") {
            Ok(Role::Editor)
        } else if s.eq_ignore_ascii_case("ADMIN") {
            Ok(Role::Admin)
        } else {
            Err(())
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in every token the service signs.
///
/// The same shape is used for access and refresh tokens; they differ in
/// lifetime, in where the guard will accept them from, and in the `kind`
/// discriminator. `role` is a required field, so a payload without it
/// fails decoding even when the signature checks out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id (users.id).
    pub sub: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// The flavor this token was issued as. Verification requires an
    /// exact match, so an access token planted in the refresh cookie
    /// (or a refresh token sent as a bearer credential) is invalid.
    pub kind: TokenKind,
    /// Issued-at, seconds since epoch.
    pub iat: usize,
    /// Expiry, seconds since epoch.
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Which of the two token flavors a cookie, claim, or signing call
/// refers to.
///
/// One canonical cookie name per flavor; the per-area cookie names the
/// old portal accumulated collapse into this table. The kind is also
/// embedded in the claims so the two flavors cannot stand in for each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub const fn cookie_name(self) -> &'static str {
        match self {
            TokenKind::Access => "pw_access",
            TokenKind::Refresh => "pw_refresh",
        }
    }
}

/// Self-registration payload. Always creates a USER-tier principal.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request payload.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of a principal returned by auth endpoints.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub image: Option<String>,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            image: user.image,
        }
    }
}

/// Login and registration response body. Tokens are also set as cookies;
/// the body copy serves non-browser clients that use the bearer header.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: SessionUser,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Refresh response: a new access token only, with the principal's
/// current role reflected in both the token and the user view.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub user: SessionUser,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Editor".parse::<Role>(), Ok(Role::Editor));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("superadmin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn role_gate_decision_table() {
        // Any authenticated principal passes a USER gate.
        assert!(Role::User.permits(Role::User));
        assert!(Role::Editor.permits(Role::User));
        assert!(Role::Admin.permits(Role::User));

        // EDITOR gate: editor and admin only.
        assert!(!Role::User.permits(Role::Editor));
        assert!(Role::Editor.permits(Role::Editor));
        assert!(Role::Admin.permits(Role::Editor));

        // ADMIN gate: admin only.
        assert!(!Role::User.permits(Role::Admin));
        assert!(!Role::Editor.permits(Role::Admin));
        assert!(Role::Admin.permits(Role::Admin));
    }

    #[test]
    fn claims_without_role_fail_to_deserialize() {
        let payload = serde_json::json!({
            "sub": "u1",
            "email": "a@b.c",
            "kind": "access",
            "iat": 0,
            "exp": 4102444800usize,
        });
        assert!(serde_json::from_value::<Claims>(payload).is_err());
    }

    #[test]
    fn claims_round_trip_keeps_role_and_kind() {
        let claims = Claims {
            sub: "u1".into(),
            email: "a@b.c".into(),
            name: Some("A".into()),
            role: Role::Editor,
            image: None,
            kind: TokenKind::Refresh,
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "EDITOR");
        assert_eq!(json["kind"], "refresh");
        let back: Claims = serde_json::from_value(json).unwrap();
        assert_eq!(back.role, Role::Editor);
        assert_eq!(back.kind, TokenKind::Refresh);
    }
}
