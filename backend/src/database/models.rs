//! Rust structs that represent database table mappings.
//!
//! Row structs derive `sqlx::FromRow` and mirror the tables as stored;
//! roles are persisted as text and parsed into [`Role`] at this boundary
//! so nothing downstream ever handles a raw role string.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::models::Role;

#[derive(Debug, Error)]
#[error("unknown role in user record: {0}")]
pub struct UnknownRole(pub String);

/// A user row as stored. Never serialized directly; the password hash
/// must not leave the database layer except for verification.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub reputation: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user with its role resolved to a tier.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub role: Role,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub reputation: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self) -> Result<User, UnknownRole> {
        let role = self.role.parse().map_err(|_| UnknownRole(self.role.clone()))?;
        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            role,
            image: self.image,
            phone: self.phone,
            reputation: self.reputation,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Article {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image: Option<String>,
    pub category_id: Option<Uuid>,
    pub author_id: Uuid,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment joined with its author's display name for listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Page {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "a@b.c".into(),
            name: "A".into(),
            password_hash: None,
            role: role.into(),
            image: None,
            phone: None,
            reputation: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn legacy_lowercase_role_resolves() {
        assert_eq!(row("admin").into_user().unwrap().role, Role::Admin);
        assert_eq!(row("EDITOR").into_user().unwrap().role, Role::Editor);
    }

    #[test]
    fn unknown_role_is_an_error_not_a_default() {
        assert!(row("owner").into_user().is_err());
    }
}
