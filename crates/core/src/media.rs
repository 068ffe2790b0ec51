//! Vehicle media: upload rules and the storage seam.
//!
//! Uploaded bytes go to a [`MediaStore`]; the database only keeps the public
//! URL and the store's identifier so the file can be removed later.

use async_trait::async_trait;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Accepted image file extensions (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Accepted video file extensions (lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv"];

/// Per-file size limit for images (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Per-file size limit for videos (100 MiB).
pub const MAX_VIDEO_BYTES: usize = 100 * 1024 * 1024;

/// Most images accepted in one upload request.
pub const MAX_IMAGES_PER_UPLOAD: usize = 10;

/// Most videos accepted in one upload request.
pub const MAX_VIDEOS_PER_UPLOAD: usize = 5;

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Storage folder, also the multipart field name uploads arrive under.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
        }
    }

    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => IMAGE_EXTENSIONS,
            MediaKind::Video => VIDEO_EXTENSIONS,
        }
    }

    pub fn max_file_bytes(self) -> usize {
        match self {
            MediaKind::Image => MAX_IMAGE_BYTES,
            MediaKind::Video => MAX_VIDEO_BYTES,
        }
    }

    pub fn max_files(self) -> usize {
        match self {
            MediaKind::Image => MAX_IMAGES_PER_UPLOAD,
            MediaKind::Video => MAX_VIDEOS_PER_UPLOAD,
        }
    }

    /// Expected MIME type prefix, e.g. `image/`.
    fn mime_prefix(self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Video => "video/",
        }
    }
}

// ---------------------------------------------------------------------------
// Upload validation
// ---------------------------------------------------------------------------

/// Lowercased extension of `filename`, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate one uploaded file and return its normalized extension.
///
/// A missing content type is tolerated; a present one must match the kind
/// (`application/octet-stream` is treated as missing).
pub fn validate_upload(
    kind: MediaKind,
    filename: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<String, CoreError> {
    let ext = file_extension(filename).ok_or_else(|| {
        CoreError::Validation(format!("File '{filename}' has no extension"))
    })?;

    if !kind.allowed_extensions().contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported {} format '.{ext}'. Supported: {:?}",
            kind.as_str(),
            kind.allowed_extensions()
        )));
    }

    if let Some(mime) = content_type {
        let mime = mime.to_ascii_lowercase();
        if mime != "application/octet-stream" && !mime.starts_with(kind.mime_prefix()) {
            return Err(CoreError::Validation(format!(
                "File '{filename}' has content type '{mime}', expected {}*",
                kind.mime_prefix()
            )));
        }
    }

    if size == 0 {
        return Err(CoreError::Validation(format!("File '{filename}' is empty")));
    }
    if size > kind.max_file_bytes() {
        return Err(CoreError::Validation(format!(
            "File '{filename}' exceeds the {} MiB limit",
            kind.max_file_bytes() / (1024 * 1024)
        )));
    }

    Ok(ext)
}

/// Validate the number of files in one upload request.
pub fn validate_file_count(kind: MediaKind, count: usize) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(format!(
            "No files received in the '{}' field",
            kind.as_str()
        )));
    }
    if count > kind.max_files() {
        return Err(CoreError::Validation(format!(
            "At most {} {} may be uploaded at once",
            kind.max_files(),
            kind.as_str()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Storage seam
// ---------------------------------------------------------------------------

/// Where a stored file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Public URL the frontend loads the file from.
    pub url: String,
    /// Store-specific identifier used to remove the file.
    pub public_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("Media I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid media identifier: {0}")]
    InvalidId(String),
}

/// Binary storage for uploaded vehicle media.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist `data` and return its public location.
    async fn store(
        &self,
        kind: MediaKind,
        extension: &str,
        data: &[u8],
    ) -> Result<StoredMedia, MediaStoreError>;

    /// Remove a previously stored file. Removing a missing file is not an error.
    async fn remove(&self, public_id: &str) -> Result<(), MediaStoreError>;
}
