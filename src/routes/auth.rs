//! Auth routes for registration, login, logout, and session info

use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::middleware::SESSION_COOKIE;
use crate::auth::models::{LoginRequest, RegisterRequest, SessionUser};
use crate::auth::password;
use crate::database::models::User;
use crate::error::{AppError, AppResult};
use crate::server::AppState;

/// GET `/` — returns the identity encoded in the session cookie.
///
/// The session middleware has already verified the cookie and injected
/// `SessionUser`; this handler just echoes it back.
pub async fn me(Extension(user): Extension<SessionUser>) -> Json<Value> {
    Json(json!({ "email": user.email, "username": user.username }))
}

/// POST `/register` — create a user from `{username, email, password}`.
///
/// The password is hashed before it ever reaches the store; a duplicate
/// email surfaces as 409 via the store's unique constraint.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<User>> {
    let email = payload.email.trim().to_lowercase();

    let password_hash = password::hash(&payload.password)?;
    let user = state
        .users
        .create(&payload.username, &email, &password_hash)
        .await?;

    tracing::info!("Registered user {}", user.email);
    Ok(Json(user))
}

/// POST `/login` — verify `{email, password}` and set the session cookie.
///
/// Success body is the literal string `"Success"`, matching the wire
/// contract the frontend expects.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<Value>)> {
    let email = payload.email.trim().to_lowercase();

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Auth("User does not exist".to_string()))?;

    if !password::verify(&payload.password, &user.password_hash)? {
        return Err(AppError::Auth("Password is incorrect".to_string()));
    }

    let token = state.tokens.issue(&user.email, &user.username)?;
    let expires_at = state.tokens.expires_at(&token)?;

    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::None); // cross origin
    cookie.set_path("/");
    // Cookie lifetime tracks the token expiry.
    let max_age = expires_at - Utc::now().timestamp();
    if max_age > 0 {
        cookie.set_max_age(time::Duration::seconds(max_age));
    }

    tracing::info!("User {} logged in", user.email);
    Ok((jar.add(cookie), Json(json!("Success"))))
}

/// GET `/logout` — clear the session cookie.
///
/// Stateless tokens are not revoked server-side; an already-issued token
/// stays valid until its expiry.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Json(json!("Success")))
}
