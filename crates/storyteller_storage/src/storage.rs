//! Storage trait definition.

use crate::AudioKey;
use storyteller_error::StorytellerResult;

/// Trait for pluggable narration audio backends.
#[async_trait::async_trait]
pub trait AudioStorage: Send + Sync {
    /// Store audio under a key, replacing any existing artifact.
    ///
    /// # Returns
    ///
    /// The public path of the written artifact, as recorded in `audio_path`
    async fn store(&self, key: &AudioKey, data: &[u8]) -> StorytellerResult<String>;

    /// Check whether an artifact exists for the key.
    async fn exists(&self, key: &AudioKey) -> StorytellerResult<bool>;

    /// Path under which the artifact is served, recorded as `audio_path`.
    fn public_path(&self, key: &AudioKey) -> String;
}

#[async_trait::async_trait]
impl<'a, T: AudioStorage + ?Sized> AudioStorage for &'a T {
    async fn store(&self, key: &AudioKey, data: &[u8]) -> StorytellerResult<String> {
        (**self).store(key, data).await
    }

    async fn exists(&self, key: &AudioKey) -> StorytellerResult<bool> {
        (**self).exists(key).await
    }

    fn public_path(&self, key: &AudioKey) -> String {
        (**self).public_path(key)
    }
}
