//! Presswire backend: a REST API for a content-managed news portal.
//!
//! Public article browsing, comments, and role-scoped back offices
//! (admin, editor) on top of PostgreSQL, with JWT-based authentication:
//! a short-lived access token and a longer-lived refresh token, accepted
//! from the `Authorization: Bearer` header or httpOnly cookies.
//!
//! Module map:
//! - [`auth`] — token issuance/verification, guards, auth endpoints
//! - [`api`] — per-resource CRUD (articles, comments, users, categories, pages)
//! - [`database`] — pool setup, row models, all SQL
//! - [`config`] / [`state`] / [`errors`] / [`middleware`] — ambient plumbing

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod state;
pub mod utils;

use config::Config;
use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = middleware::cors(&state.config);

    Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth::routes::router())
        .nest("/api", api::router())
        .layer(cors)
        .layer(middleware::trace())
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    info!("Connecting to database...");
    let pool = database::connect(&config)
        .await
        .expect("Database misconfigured!");

    let state = AppState::new(pool, config);
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = router(state);

    info!("Binding to {addr}");
    let listener = TcpListener::bind(addr).await.expect("Failed to bind");
    info!("Server running on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    info!("Server shut down");
}

async fn root_handler() -> &'static str {
    "Presswire API"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
