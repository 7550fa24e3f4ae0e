//! Module for database connection setup and common utilities.
//!
//! Initializes the PostgreSQL connection pool. All SQL lives in
//! [`queries`]; row structs live in [`models`].

pub mod models;
pub mod queries;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    info!("Database pool ready");
    Ok(pool)
}

/// True when the error is a unique-constraint violation, used to turn
/// duplicate emails and slugs into 409s instead of 500s.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}
