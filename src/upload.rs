//! Upload Handler
//!
//! Writes a single multipart file to the configured upload directory under a
//! collision-resistant name and hands back the bare filename for storage on a
//! post record. Uploaded files are served statically by the router, so only
//! the filename is persisted, never a path.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{AppResult, UploadError};

/// Stores uploaded files on the local filesystem.
#[derive(Debug, Clone)]
pub struct UploadHandler {
    dir: PathBuf,
}

impl UploadHandler {
    /// Create a handler rooted at `dir`, creating the directory if needed.
    pub async fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(UploadError::Write)?;
        Ok(Self { dir })
    }

    /// Directory uploads are written to, for wiring up static serving.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the file contents and return the generated filename.
    pub async fn store(&self, original_filename: &str, data: &[u8]) -> AppResult<String> {
        let name = generated_filename(original_filename, Utc::now().timestamp_millis());
        tokio::fs::write(self.dir.join(&name), data)
            .await
            .map_err(UploadError::Write)?;
        Ok(name)
    }

    /// Best-effort removal, used to compensate when the post insert fails
    /// after the file was already written.
    pub async fn remove(&self, filename: &str) {
        if let Err(e) = tokio::fs::remove_file(self.dir.join(filename)).await {
            tracing::warn!("Failed to remove orphaned upload {}: {}", filename, e);
        }
    }
}

/// `file_<millis><original extension>`; the timestamp keeps concurrent
/// uploads from colliding in practice.
fn generated_filename(original: &str, millis: i64) -> String {
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("file_{millis}{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_original_extension() {
        assert_eq!(generated_filename("cat.png", 1700000000000), "file_1700000000000.png");
        assert_eq!(
            generated_filename("archive.tar.gz", 1700000000000),
            "file_1700000000000.gz"
        );
    }

    #[test]
    fn filename_without_extension() {
        assert_eq!(generated_filename("README", 1700000000000), "file_1700000000000");
    }

    #[tokio::test]
    async fn store_writes_and_remove_deletes() {
        let tmp = tempfile::tempdir().unwrap();
        let uploads = UploadHandler::new(tmp.path()).await.unwrap();

        let name = uploads.store("photo.jpg", b"not really a jpeg").await.unwrap();
        assert!(name.starts_with("file_"));
        assert!(name.ends_with(".jpg"));

        let on_disk = tmp.path().join(&name);
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"not really a jpeg");

        uploads.remove(&name).await;
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn new_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("public").join("images");
        let uploads = UploadHandler::new(&nested).await.unwrap();
        assert!(uploads.dir().is_dir());
    }
}
