//! Main entry point for the Presswire backend.
//!
//! Initializes the Axum web server, the database pool, and all API
//! routes; the heavy lifting lives in the library crate.

#[tokio::main]
async fn main() {
    backend::start_server().await;
}
