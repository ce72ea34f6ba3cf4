//! Configuration module for environment variables and application settings

use std::env;
use anyhow::{Result, anyhow};

/// Application configuration, read once at startup and passed into each
/// component's constructor. No global state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseSettings,

    /// Server configuration
    pub server: ServerConfig,

    /// Session signing configuration
    pub auth: AuthConfig,

    /// File upload configuration
    pub upload: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin for the frontend, if any.
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used for both signing and verifying session tokens.
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to and served from.
    pub dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database: DatabaseSettings {
                url: env::var("DATABASE_URL")
                    .map_err(|_| anyhow!("DATABASE_URL environment variable is required"))?,
            },

            server: ServerConfig {
                host: env::var("SERVER_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "1200".to_string())
                    .parse()
                    .unwrap_or(1200),
                cors_origin: env::var("CORS_ORIGIN").ok(),
            },

            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| anyhow!("JWT_SECRET environment variable is required"))?,
            },

            upload: UploadConfig {
                dir: env::var("UPLOAD_DIR")
                    .unwrap_or_else(|_| "public/images".to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var mutation is process-wide, so the whole flow lives in one test
    // to keep it away from parallel test threads.
    #[test]
    fn from_env_requires_secret_and_applies_defaults() {
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("JWT_SECRET");
            env::remove_var("SERVER_HOST");
            env::remove_var("PORT");
            env::remove_var("UPLOAD_DIR");
            env::remove_var("CORS_ORIGIN");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var("DATABASE_URL", "postgres://localhost/blog");
        }
        assert!(Config::from_env().is_err(), "JWT_SECRET must be required");

        unsafe {
            env::set_var("JWT_SECRET", "test-secret");
        }
        let config = Config::from_env().expect("all required vars set");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 1200);
        assert_eq!(config.upload.dir, "public/images");
        assert!(config.server.cors_origin.is_none());
    }
}
