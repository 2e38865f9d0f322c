//! Local filesystem storage for uploaded images

use std::path::PathBuf;

use sales_shared::config::StorageSettings;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Empty file")]
    Empty,

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub url: String,
    pub path: PathBuf,
    pub size: usize,
    pub content_type: String,
}

/// Map an accepted image MIME type to the file extension we store it under.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Whether `bytes` start with the magic number of the `ext` format.
fn matches_signature(ext: &str, bytes: &[u8]) -> bool {
    match ext {
        "png" => bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "jpg" => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
        "gif" => bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a"),
        "webp" => bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP",
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
    max_bytes: usize,
}

impl LocalStorage {
    pub fn new(settings: &StorageSettings) -> Self {
        Self {
            root: PathBuf::from(&settings.root),
            public_base_url: settings.public_base_url.trim_end_matches('/').to_string(),
            max_bytes: settings.max_upload_bytes,
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Store `bytes` as `{root}/{tenant}/{uuid}.{ext}` and return its public URL.
    pub async fn save_image(
        &self,
        tenant_id: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError> {
        let ext = image_extension(content_type)
            .ok_or_else(|| StorageError::UnsupportedType(content_type.to_string()))?;
        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }
        if bytes.len() > self.max_bytes {
            return Err(StorageError::TooLarge { limit: self.max_bytes });
        }
        if !matches_signature(ext, bytes) {
            warn!("Rejected upload declared as {} with mismatching content", content_type);
            return Err(StorageError::UnsupportedType(format!(
                "content does not match {}",
                content_type
            )));
        }

        let dir = self.root.join(tenant_id.to_string());
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), ext);
        let path = dir.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        let url = format!("{}/{}/{}", self.public_base_url, tenant_id, file_name);
        info!("Stored upload {} ({} bytes)", url, bytes.len());

        Ok(StoredFile {
            url,
            path,
            size: bytes.len(),
            content_type: content_type.to_string(),
        })
    }
}
