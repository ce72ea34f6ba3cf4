//! Authentication Models
//!
//! Data structures for authentication requests and the per-request identity
//! produced by session verification.

use serde::{Deserialize, Serialize};

/// Authenticated identity extracted from a verified session token.
///
/// Inserted into request extensions by the session middleware and read back
/// by protected handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub username: String,
}

/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
