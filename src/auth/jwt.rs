//! JWT Token Service
//!
//! Handles session token creation, validation, and claims management for user
//! authentication. Tokens are stateless: the server keeps no session table, so
//! a token stays valid until its expiry even after logout.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, TokenError};

/// JWT Claims structure containing user identity and token metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User email, the natural key for login
    pub email: String,
    /// Display name chosen at registration
    pub username: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
}

/// JWT Service for token operations
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

/// Session tokens expire one day after issuance.
const TOKEN_TTL_HOURS: i64 = 24;

const ISSUER: &str = "blog-server";

impl TokenService {
    /// Create a new token service. The same secret signs and verifies.
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a session token for the given identity
    pub fn issue(&self, email: &str, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        self.issue_at(email, username, now.timestamp(), (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp())
    }

    fn issue_at(&self, email: &str, username: &str, iat: i64, exp: i64) -> Result<String, AppError> {
        let claims = Claims {
            email: email.to_string(),
            username: username.to_string(),
            iat,
            exp,
            iss: ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode session token: {e}")))
    }

    /// Validate a token's signature and expiry and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    /// Expiry timestamp of a freshly issued token, for cookie max-age
    pub fn expires_at(&self, token: &str) -> Result<i64, AppError> {
        Ok(self.verify(token)?.exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        let tokens = TokenService::new("test_secret");

        let token = tokens.issue("test@example.com", "tester").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.username, "tester");
        assert_eq!(claims.iss, "blog-server");
    }

    #[test]
    fn tampered_token_is_malformed() {
        let tokens = TokenService::new("test_secret");
        let token = tokens.issue("test@example.com", "tester").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert_eq!(tokens.verify(&tampered), Err(TokenError::Malformed));

        let other = TokenService::new("other_secret");
        assert_eq!(other.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new("test_secret");
        let past = Utc::now().timestamp() - 2 * 60 * 60;
        let token = tokens
            .issue_at("test@example.com", "tester", past - 10, past)
            .unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn expires_at_is_one_day_out() {
        let tokens = TokenService::new("test_secret");
        let token = tokens.issue("test@example.com", "tester").unwrap();

        let exp = tokens.expires_at(&token).unwrap();
        let expected = Utc::now().timestamp() + 24 * 60 * 60;
        assert!((exp - expected).abs() < 5);
    }
}
