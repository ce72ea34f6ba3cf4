//! # Blog Server
//!
//! A minimal blog backend built with Rust, Axum, and Tokio: user
//! registration and login, cookie-based sessions, and post CRUD with file
//! uploads.
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: Router assembly, shared state, and the listener
//! - `config`: Environment variable configuration management
//! - `auth`: Password hashing, session tokens, and the session middleware
//! - `database`: Connection pool, migrations, and the user/post stores
//! - `routes`: HTTP route handlers organized by functionality
//! - `upload`: Multipart file storage under the public upload directory
//!
//! ## Environment Setup
//! Required: `DATABASE_URL`, `JWT_SECRET`. Optional: `SERVER_HOST`, `PORT`,
//! `UPLOAD_DIR`, `CORS_ORIGIN`. A `.env` file is loaded if present.
//!
//! ## Running the Server
//! ```bash
//! cargo run
//! ```
//!
//! ## Health Check
//! ```bash
//! curl http://localhost:1200/ping
//! ```

mod auth;
mod config;
mod database;
mod error;
mod routes;
mod server;
mod upload;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Loads `.env`, initializes the tracing subscriber, reads configuration
/// once, and starts the HTTP server. Startup aborts if configuration is
/// incomplete or the store is unreachable.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = config::Config::from_env()?;

    server::start(config).await
}
