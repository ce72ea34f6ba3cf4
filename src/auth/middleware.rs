//! Session Middleware
//!
//! Axum middleware that verifies the `token` session cookie and injects the
//! decoded identity into request extensions for downstream handlers.
//!
//! Per-request state machine: no cookie -> reject; cookie present -> verify ->
//! valid: attach `SessionUser` and proceed; invalid: reject. No retry.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{jwt::TokenService, models::SessionUser};
use crate::error::{AppError, TokenError};

/// Name of the session cookie set at login and cleared at logout.
pub const SESSION_COOKIE: &str = "token";

/// Session middleware guarding protected routes
pub struct SessionMiddleware;

impl SessionMiddleware {
    /// Middleware function for verifying the session cookie
    pub async fn require_session(
        State(tokens): State<Arc<TokenService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, AppError> {
        let token = match session_cookie(&req) {
            Some(token) => token,
            None => {
                tracing::warn!("{} {} rejected: no session cookie", req.method(), req.uri());
                return Err(TokenError::Missing.into());
            }
        };

        let claims = tokens.verify(&token).map_err(|e| {
            tracing::warn!("{} {} rejected: {}", req.method(), req.uri(), e);
            e
        })?;

        // Make the verified identity available to the handler.
        req.extensions_mut().insert(SessionUser {
            email: claims.email,
            username: claims.username,
        });

        Ok(next.run(req).await)
    }
}

/// Pull the session token out of the Cookie header, if present.
fn session_cookie(req: &Request) -> Option<String> {
    req.headers()
        .get(header::COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(rest) = cookie
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|r| r.strip_prefix('='))
                {
                    return Some(rest.to_string());
                }
            }
            None
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_cookie(value: &str) -> Request {
        Request::builder()
            .uri("/")
            .header(header::COOKIE, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn extracts_session_cookie_among_others() {
        let req = request_with_cookie("theme=dark; token=abc.def.ghi; lang=en");
        assert_eq!(session_cookie(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn missing_cookie_yields_none() {
        let req = request_with_cookie("theme=dark");
        assert_eq!(session_cookie(&req), None);

        let bare = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(session_cookie(&bare), None);
    }
}
