//! Post CRUD routes
//!
//! Create accepts a multipart form (`file`, `title`, `description`, `email`);
//! the remaining endpoints are plain JSON. Create and delete require a
//! session; reads and edits are public, per the wire contract.

use axum::extract::{Multipart, Path, State};
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::models::SessionUser;
use crate::database::models::{NewPost, Post};
use crate::error::{AppError, AppResult, UploadError};
use crate::server::AppState;

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct EditPostRequest {
    pub title: String,
    pub description: String,
}

/// POST `/create` — create a post from a multipart form.
///
/// The file is written to the upload directory first; if the record insert
/// then fails, the file is removed so no orphan is left behind.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut title = None;
    let mut description = None;
    let mut email = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some(FILE_FIELD) => {
                let original = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file field: {e}")))?;
                file = Some((original, data.to_vec()));
            }
            Some("title") => title = Some(read_text(field).await?),
            Some("description") => description = Some(read_text(field).await?),
            Some("email") => email = Some(read_text(field).await?),
            _ => {}
        }
    }

    let (original, data) = file.ok_or(UploadError::MissingFile)?;
    let title = title.ok_or_else(|| AppError::Validation("Missing title".to_string()))?;
    let description =
        description.ok_or_else(|| AppError::Validation("Missing description".to_string()))?;
    // Author email comes from the form body, not the session, matching the
    // existing frontend contract.
    let author_email = email.unwrap_or(user.email);

    let file_name = state.uploads.store(&original, &data).await?;

    let post = NewPost {
        title,
        description,
        file_name: Some(file_name.clone()),
        author_email,
    };

    match state.posts.create(post).await {
        Ok(created) => {
            tracing::info!("Created post {} with file {}", created.id, file_name);
            Ok(Json(json!("Success")))
        }
        Err(e) => {
            // The file write and record insert are not atomic; compensate.
            state.uploads.remove(&file_name).await;
            Err(e)
        }
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart field: {e}")))
}

/// GET `/getposts` — all posts, unordered and unpaginated
pub async fn get_posts(State(state): State<AppState>) -> AppResult<Json<Vec<Post>>> {
    let posts = state.posts.list_all().await?;
    Ok(Json(posts))
}

/// GET `/getpostbyid/{id}`
pub async fn get_post_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Post>> {
    let post = state.posts.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(post))
}

/// PUT `/editpost/{id}` — update title and description only
pub async fn edit_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditPostRequest>,
) -> AppResult<Json<Value>> {
    let updated = state
        .posts
        .update_by_id(id, &payload.title, &payload.description)
        .await?;

    if !updated {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!("Success")))
}

/// DELETE `/deletebyid/{id}` — session required
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let deleted = state.posts.delete_by_id(id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    tracing::info!("Post {} deleted by {}", id, user.email);
    Ok(Json(json!("Success")))
}
