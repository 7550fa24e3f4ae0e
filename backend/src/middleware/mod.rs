//! General-purpose middleware for the API.
//!
//! CORS and request tracing layers applied to the whole router. Auth
//! guards live in `auth::middleware`, not here.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;

pub fn cors(config: &Config) -> CorsLayer {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| {
            warn!("Invalid ALLOWED_ORIGIN value: {e}");
        })
        .expect("Environment misconfigured!");

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

pub fn trace() -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
}
