//! Multipart upload plumbing shared by the image and video handlers.

use axum::body::Bytes;
use axum::extract::Multipart;
use nextcar_core::error::CoreError;
use nextcar_core::media::{
    validate_file_count, validate_upload, MediaKind, MediaStore, MediaStoreError, StoredMedia,
};

use crate::error::{AppError, AppResult};

/// Multipart overhead allowed on top of the file payload limits.
const MULTIPART_SLACK_BYTES: usize = 1024 * 1024;

/// Request body limit for an upload route of the given kind.
pub fn body_limit(kind: MediaKind) -> usize {
    kind.max_files() * kind.max_file_bytes() + MULTIPART_SLACK_BYTES
}

/// One validated file from a multipart request.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub extension: String,
    pub data: Bytes,
}

/// A file that has been written to the media store.
#[derive(Debug)]
pub struct StoredUpload {
    pub filename: String,
    pub stored: StoredMedia,
}

/// Read every file sent under the `kind` field (`images` or `videos`).
///
/// Other fields are ignored. Each file is validated as it arrives, and the
/// request is rejected once it carries more files than the kind allows.
pub async fn read_uploads(mut multipart: Multipart, kind: MediaKind) -> AppResult<Vec<UploadedFile>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(kind.as_str()) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest(format!("'{}' field is not a file", kind.as_str())))?;
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let extension = validate_upload(kind, &filename, content_type.as_deref(), data.len())?;
        files.push(UploadedFile {
            filename,
            extension,
            data,
        });
        validate_file_count(kind, files.len())?;
    }

    validate_file_count(kind, files.len())?;
    Ok(files)
}

/// Write all files to the store. If any write fails, the files already
/// written by this call are removed before the error is returned.
pub async fn store_all(
    media: &dyn MediaStore,
    kind: MediaKind,
    files: Vec<UploadedFile>,
) -> AppResult<Vec<StoredUpload>> {
    let mut stored = Vec::with_capacity(files.len());

    for file in files {
        match media.store(kind, &file.extension, &file.data).await {
            Ok(location) => stored.push(StoredUpload {
                filename: file.filename,
                stored: location,
            }),
            Err(e) => {
                let written: Vec<String> =
                    stored.into_iter().map(|s| s.stored.public_id).collect();
                remove_stored(media, written).await;
                return Err(storage_error(e));
            }
        }
    }

    Ok(stored)
}

/// Remove stored files, logging failures instead of propagating them.
pub async fn remove_stored<I>(media: &dyn MediaStore, public_ids: I)
where
    I: IntoIterator<Item = String>,
{
    for public_id in public_ids {
        if let Err(e) = media.remove(&public_id).await {
            tracing::warn!(public_id = %public_id, error = %e, "Failed to remove stored media");
        }
    }
}

pub fn storage_error(err: MediaStoreError) -> AppError {
    match err {
        MediaStoreError::InvalidId(id) => {
            AppError::Core(CoreError::Validation(format!("Invalid media identifier: {id}")))
        }
        MediaStoreError::Io(e) => AppError::InternalError(format!("Media storage error: {e}")),
    }
}
