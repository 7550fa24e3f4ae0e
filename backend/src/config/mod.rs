//! Central module for application-wide configuration settings.
//!
//! Configuration is loaded once at startup from the process environment.
//! Anything security-critical (the token signing secret, the database URL)
//! is mandatory: startup aborts with a clear message instead of falling
//! back to a weak default.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// HMAC secret used to sign access and refresh tokens. Mandatory.
    pub jwt_secret: String,
    /// Access token lifetime, in minutes.
    pub access_ttl_minutes: i64,
    /// Refresh token lifetime, in days.
    pub refresh_ttl_days: i64,
    /// Marks auth cookies `Secure` when true.
    pub production: bool,
    pub allowed_origin: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PRESSWIRE_PORT", "8080"),
            database_url: require("DATABASE_URL"),
            jwt_secret: require("JWT_SECRET"),
            access_ttl_minutes: try_load("ACCESS_TTL_MINUTES", "15"),
            refresh_ttl_days: try_load("REFRESH_TTL_DAYS", "7"),
            production: try_load("PRESSWIRE_PRODUCTION", "false"),
            allowed_origin: try_load("ALLOWED_ORIGIN", "http://localhost:3000"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// Loads a mandatory variable. There is deliberately no fallback for the
/// signing secret: running with a known default is a forgery vector.
fn require(key: &str) -> String {
    var(key).unwrap_or_else(|_| panic!("{key} must be set"))
}
