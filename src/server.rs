//! # Server Module
//!
//! HTTP server setup and route configuration for the blog server.

use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::auth::jwt::TokenService;
use crate::auth::middleware::SessionMiddleware;
use crate::config::Config;
use crate::database::{migrations, DatabaseConnection, PostStore, UserStore};
use crate::routes;
use crate::upload::UploadHandler;

/// Application state shared across all route handlers.
///
/// Everything in here is read-only after startup; no shared mutable state
/// crosses request boundaries.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub users: UserStore,
    pub posts: PostStore,
    pub uploads: UploadHandler,
}

/// Starts the blog HTTP server.
///
/// Fails (rather than serving degraded) if the store cannot be reached or
/// the upload directory cannot be created.
pub async fn start(config: Config) -> anyhow::Result<()> {
    let tokens = Arc::new(TokenService::new(&config.auth.jwt_secret));

    let db = DatabaseConnection::from_url(&config.database.url).await?;
    migrations::run_migrations(db.pool()).await?;

    let uploads = UploadHandler::new(&config.upload.dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare upload directory: {e}"))?;

    let app_state = AppState {
        tokens: tokens.clone(),
        users: UserStore::new(db.pool().clone()),
        posts: PostStore::new(db.pool().clone()),
        uploads: uploads.clone(),
    };

    // Session-guarded endpoints
    let protected_routes = Router::new()
        .route("/", get(routes::auth::me))
        .route("/create", post(routes::posts::create_post))
        .route("/deletebyid/{id}", delete(routes::posts::delete_post))
        .layer(middleware::from_fn_with_state(
            tokens.clone(),
            SessionMiddleware::require_session,
        ));

    let public_routes = Router::new()
        .route("/ping", get(routes::health::ping))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", get(routes::auth::logout))
        .route("/getposts", get(routes::posts::get_posts))
        .route("/getpostbyid/{id}", get(routes::posts::get_post_by_id))
        .route("/editpost/{id}", put(routes::posts::edit_post));

    let app = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        // Uploaded files are served back as static content.
        .nest_service("/images", ServeDir::new(uploads.dir()))
        .layer(ServiceBuilder::new().layer(cors_layer(&config)?))
        .with_state(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Blog server listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/ping", addr);
    tracing::info!("Serving uploads from {} at /images", config.upload.dir);

    axum::serve(listener, app).await?;
    Ok(())
}

/// CORS for the browser frontend: configured origin, credentials allowed so
/// the session cookie travels with cross-origin requests.
fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::ORIGIN,
            axum::http::HeaderName::from_static("x-requested-with"),
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::header::AUTHORIZATION,
        ]);

    if let Some(origin) = &config.server.cors_origin {
        cors = cors
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_credentials(true);
    }

    Ok(cors)
}
