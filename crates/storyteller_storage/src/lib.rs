//! Narration audio storage for Storyteller.
//!
//! Artifacts are addressed by the story and segment they narrate, so the
//! same record always maps to the same location:
//!
//! ```text
//! story_<number>/segment_<id>.mp3
//! story_<number>/segment_<id>_questions/question_<index>.mp3
//! ```
//!
//! Existence of an artifact is what the narrator uses to skip work on a re-run.
//!
//! # Example
//!
//! ```rust
//! use storyteller_storage::{AudioKey, AudioStorage, FileSystemStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/storyteller-audio", "/audio")?;
//! let key = AudioKey::segment(1, 2);
//!
//! let audio_path = storage.store(&key, b"ID3...").await?;
//! assert_eq!(audio_path, "/audio/story_1/segment_2.mp3");
//! assert!(storage.exists(&key).await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod key;
mod storage;

pub use filesystem::FileSystemStorage;
pub use key::AudioKey;
pub use storage::AudioStorage;
pub use storyteller_error::{StorageError, StorageErrorKind};
