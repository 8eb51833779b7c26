//! File uploads stored on local disk

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    config::UploadConfig,
    error::{AppError, AppResult},
};

static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{1,10}$").unwrap());

#[derive(Debug, Serialize, ToSchema)]
pub struct StoredFile {
    /// Generated name on disk
    pub filename: String,
    /// Public URL the file is served from
    pub url: String,
    pub size: usize,
    pub original_name: Option<String>,
}

/// Lowercased extension of a client file name, if it is a plain alphanumeric one
pub fn sanitize_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || !EXTENSION.is_match(ext) {
        return None;
    }
    Some(ext.to_lowercase())
}

/// `uuid.ext`, or a bare uuid when the extension is unusable
pub fn generated_name(file_name: Option<&str>) -> String {
    let id = Uuid::new_v4();
    match file_name.and_then(sanitize_extension) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

#[derive(Clone)]
pub struct UploadsService {
    config: UploadConfig,
}

impl UploadsService {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Write one file under a generated name
    pub async fn store(&self, original_name: Option<&str>, bytes: &[u8]) -> AppResult<StoredFile> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if bytes.len() > self.config.max_bytes {
            return Err(AppError::BadRequest(format!(
                "File exceeds maximum size of {} bytes",
                self.config.max_bytes
            )));
        }

        tokio::fs::create_dir_all(&self.config.directory)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {}", e)))?;

        let filename = generated_name(original_name);
        let path = PathBuf::from(&self.config.directory).join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write upload: {}", e)))?;

        tracing::info!(file = %filename, size = bytes.len(), "File uploaded");
        Ok(StoredFile {
            url: format!("{}/{}", self.config.public_path.trim_end_matches('/'), filename),
            filename,
            size: bytes.len(),
            original_name: original_name.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(sanitize_extension("Photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(sanitize_extension("archive.tar.gz").as_deref(), Some("gz"));
    }

    #[test]
    fn suspicious_extensions_are_dropped() {
        assert_eq!(sanitize_extension("noext"), None);
        assert_eq!(sanitize_extension(".bashrc"), None);
        assert_eq!(sanitize_extension("x.php/../../etc"), None);
        assert_eq!(sanitize_extension("x.averyverylongext"), None);
    }

    #[test]
    fn generated_names_keep_only_the_extension() {
        let name = generated_name(Some("../../secret.png"));
        assert!(name.ends_with(".png"));
        assert!(!name.contains('/'));
        assert_eq!(name.len(), 36 + 4);
        assert_eq!(generated_name(None).len(), 36);
    }

    #[tokio::test]
    async fn oversized_file_is_refused() {
        let service = UploadsService::new(UploadConfig {
            directory: std::env::temp_dir().join("market-upload-test").display().to_string(),
            max_bytes: 4,
            public_path: "/uploads".to_string(),
        });
        let err = service.store(Some("a.txt"), b"12345").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn stored_file_lands_in_directory() {
        let dir = std::env::temp_dir().join(format!("market-upload-{}", Uuid::new_v4()));
        let service = UploadsService::new(UploadConfig {
            directory: dir.display().to_string(),
            max_bytes: 1024,
            public_path: "/uploads/".to_string(),
        });
        let stored = service.store(Some("notes.TXT"), b"hello").await.unwrap();
        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.filename.ends_with(".txt"));
        let written = tokio::fs::read(dir.join(&stored.filename)).await.unwrap();
        assert_eq!(written, b"hello");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
