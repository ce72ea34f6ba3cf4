//! Credential Store
//!
//! Persistence for user records. Insert and email lookup only; this system
//! never mutates or deletes users.

use deadpool_postgres::Pool;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::database::models::{FromRow, User};
use crate::error::{AppError, AppResult};

/// Store for user records
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: Pool,
}

impl UserStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A duplicate email surfaces as `Conflict` via the
    /// unique constraint rather than a racy pre-check.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();

        let row = client
            .query_one(
                "INSERT INTO users (id, username, email, password_hash)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, username, email, password_hash, created_at",
                &[&id, &username, &email, &password_hash],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    AppError::Conflict("Email is already registered".to_string())
                } else {
                    AppError::Store(e)
                }
            })?;

        Ok(User::from_row(&row)?)
    }

    /// Look up a user by email, the natural key for login
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, username, email, password_hash, created_at
                 FROM users WHERE email = $1",
                &[&email],
            )
            .await?;

        row.map(|r| User::from_row(&r)).transpose().map_err(Into::into)
    }
}
