//! Post Store
//!
//! Persistence for blog posts. Lookups return `Ok(None)` and updates/deletes
//! return `Ok(false)` for a missing id, so routes can map "not found"
//! separately from connectivity failures.

use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::database::models::{FromRow, NewPost, Post};
use crate::error::AppResult;

/// Store for post records
#[derive(Debug, Clone)]
pub struct PostStore {
    pool: Pool,
}

impl PostStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, post: NewPost) -> AppResult<Post> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();

        let row = client
            .query_one(
                "INSERT INTO posts (id, title, description, file_name, author_email)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id, title, description, file_name, author_email, created_at",
                &[
                    &id,
                    &post.title,
                    &post.description,
                    &post.file_name,
                    &post.author_email,
                ],
            )
            .await?;

        Ok(Post::from_row(&row)?)
    }

    /// All posts, unordered and unbounded
    pub async fn list_all(&self) -> AppResult<Vec<Post>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT id, title, description, file_name, author_email, created_at FROM posts",
                &[],
            )
            .await?;

        rows.iter()
            .map(|r| Post::from_row(r).map_err(Into::into))
            .collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, title, description, file_name, author_email, created_at
                 FROM posts WHERE id = $1",
                &[&id],
            )
            .await?;

        row.map(|r| Post::from_row(&r)).transpose().map_err(Into::into)
    }

    /// Update title and description only; the attached file and author are
    /// immutable after creation.
    pub async fn update_by_id(&self, id: Uuid, title: &str, description: &str) -> AppResult<bool> {
        let client = self.pool.get().await?;
        let n = client
            .execute(
                "UPDATE posts SET title = $1, description = $2 WHERE id = $3",
                &[&title, &description, &id],
            )
            .await?;

        Ok(n > 0)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let client = self.pool.get().await?;
        let n = client
            .execute("DELETE FROM posts WHERE id = $1", &[&id])
            .await?;

        Ok(n > 0)
    }
}
