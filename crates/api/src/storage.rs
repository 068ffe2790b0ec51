//! Local-disk [`MediaStore`] implementation.
//!
//! Files are written to `{root}/{images|videos}/{uuid}.{ext}` and served by
//! the router under `{base_url}/...`. The store's public id is the path
//! relative to `root`, e.g. `images/3f2a....jpg`.

use std::path::PathBuf;

use async_trait::async_trait;
use nextcar_core::media::{MediaKind, MediaStore, MediaStoreError, StoredMedia};
use uuid::Uuid;

pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Map a public id back to a path under `root`, refusing anything that
    /// could escape it.
    fn resolve(&self, public_id: &str) -> Result<PathBuf, MediaStoreError> {
        let invalid = || MediaStoreError::InvalidId(public_id.to_string());
        let (folder, name) = public_id.split_once('/').ok_or_else(invalid)?;

        let known_folder = [MediaKind::Image, MediaKind::Video]
            .iter()
            .any(|k| k.as_str() == folder);
        let safe_name = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && !name.contains("..");

        if !known_folder || !safe_name {
            return Err(invalid());
        }
        Ok(self.root.join(folder).join(name))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(
        &self,
        kind: MediaKind,
        extension: &str,
        data: &[u8],
    ) -> Result<StoredMedia, MediaStoreError> {
        let dir = self.root.join(kind.as_str());
        tokio::fs::create_dir_all(&dir).await?;

        let name = format!("{}.{extension}", Uuid::new_v4().simple());
        tokio::fs::write(dir.join(&name), data).await?;

        let public_id = format!("{}/{name}", kind.as_str());
        tracing::debug!(public_id = %public_id, bytes = data.len(), "Stored media file");
        Ok(StoredMedia {
            url: format!("{}/{public_id}", self.base_url),
            public_id,
        })
    }

    async fn remove(&self, public_id: &str) -> Result<(), MediaStoreError> {
        let path = self.resolve(public_id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
