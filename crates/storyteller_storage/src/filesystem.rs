//! Filesystem-based audio storage implementation.
//!
//! Artifacts live at `{base_path}/{key.relative_path()}`; the same key
//! always maps to the same file.

use crate::{AudioKey, AudioStorage};
use std::path::{Path, PathBuf};
use storyteller_error::{StorageError, StorageErrorKind, StorytellerResult};

/// Filesystem storage backend.
///
/// # Example Structure
///
/// ```text
/// public/audio/
/// ├── story_1/
/// │   ├── segment_1.mp3
/// │   ├── segment_2.mp3
/// │   └── segment_2_questions/
/// │       ├── question_0.mp3
/// │       └── question_1.mp3
/// └── story_2/
///     └── segment_1.mp3
/// ```
///
/// Writes go to a temporary file that is renamed into place, so an
/// interrupted run never leaves a truncated artifact that would later be
/// mistaken for a finished one.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
    public_prefix: String,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Root directory for audio artifacts
    /// * `public_prefix` - Prefix of the paths recorded in the story document (e.g. `/audio`)
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path, public_prefix))]
    pub fn new(
        base_path: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> StorytellerResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened filesystem audio storage");
        Ok(Self {
            base_path,
            public_prefix: public_prefix.into(),
        })
    }

    /// Root directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Filesystem path for a key.
    pub fn path_for(&self, key: &AudioKey) -> PathBuf {
        key.relative_path()
            .split('/')
            .fold(self.base_path.clone(), |path, part| path.join(part))
    }
}

#[async_trait::async_trait]
impl AudioStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(key = %key, size = data.len()))]
    async fn store(&self, key: &AudioKey, data: &[u8]) -> StorytellerResult<String> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), size = data.len(), "Stored audio file");
        Ok(self.public_path(key))
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn exists(&self, key: &AudioKey) -> StorytellerResult<bool> {
        let path = self.path_for(key);
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }

    fn public_path(&self, key: &AudioKey) -> String {
        let prefix = self.public_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            key.relative_path()
        } else {
            format!("{}/{}", prefix, key.relative_path())
        }
    }
}
