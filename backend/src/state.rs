//! Shared application state handed to every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth: AuthService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let auth = AuthService::new(pool.clone(), &config);
        Self {
            pool,
            auth,
            config: Arc::new(config),
        }
    }
}
