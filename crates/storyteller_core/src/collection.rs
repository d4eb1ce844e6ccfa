//! The on-disk story document.
//!
//! Every stage reads the whole document into memory, mutates it, and
//! rewrites it in full. Writes go through a temporary sibling file and a
//! rename, so a reader never observes a half-written document.

use crate::{Story, WordTiming};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use storyteller_error::{JsonError, PipelineError, PipelineErrorKind, StorytellerResult};
use tracing::{debug, info, instrument};

/// Ordered collection of stories, persisted as a bare JSON array.
///
/// # Examples
///
/// ```
/// use storyteller_core::{Segment, Story, StoryCollection};
///
/// let story = Story {
///     story_number: 1,
///     title: "The Lion and the Mouse".to_string(),
///     full_text: "A lion slept.".to_string(),
///     summary: "A lion slept.".to_string(),
///     moral: "Moral to be generated later.".to_string(),
///     segments: vec![Segment::new(1, "A lion slept.")],
/// };
///
/// let collection = StoryCollection::new(vec![story]);
/// collection.validate().unwrap();
/// assert_eq!(collection.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryCollection {
    stories: Vec<Story>,
}

impl StoryCollection {
    /// Wrap an ordered list of stories.
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    /// Stories in presentation order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Stories in presentation order, mutably.
    pub fn stories_mut(&mut self) -> &mut [Story] {
        &mut self.stories
    }

    /// Consume the collection.
    pub fn into_stories(self) -> Vec<Story> {
        self.stories
    }

    /// Number of stories.
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Whether the collection holds no stories.
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Look up a story by number.
    pub fn story(&self, story_number: u32) -> Option<&Story> {
        self.stories.iter().find(|s| s.story_number == story_number)
    }

    /// Check the record invariants.
    ///
    /// - `story_number` is positive and unique
    /// - `segment_id` runs densely from 1 in segment order
    /// - every word timing is well formed
    ///
    /// Missing enrichment or audio fields are not errors.
    pub fn validate(&self) -> StorytellerResult<()> {
        let mut seen = HashSet::new();
        for story in &self.stories {
            if story.story_number == 0 {
                return Err(invalid(format!("story '{}' has number 0", story.title)));
            }
            if !seen.insert(story.story_number) {
                return Err(invalid(format!(
                    "story number {} appears more than once",
                    story.story_number
                )));
            }
            for (position, segment) in story.segments.iter().enumerate() {
                let expected = position as u32 + 1;
                if segment.segment_id != expected {
                    return Err(invalid(format!(
                        "story {} has segment_id {} at position {} (expected {})",
                        story.story_number, segment.segment_id, position, expected
                    )));
                }
                check_timings(&segment.timestamps).map_err(|word| {
                    invalid(format!(
                        "story {} segment {} has malformed timing for '{}'",
                        story.story_number, segment.segment_id, word
                    ))
                })?;
                for question in &segment.guided_questions {
                    if let crate::GuidedQuestion::Structured(q) = question {
                        check_timings(&q.timestamps).map_err(|word| {
                            invalid(format!(
                                "story {} segment {} question has malformed timing for '{}'",
                                story.story_number, segment.segment_id, word
                            ))
                        })?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Load and validate a document.
    ///
    /// # Errors
    ///
    /// - `MissingInput` if the file does not exist
    /// - `InputRead` if it cannot be read
    /// - `JsonError` if it is not a story array
    /// - `InvalidDocument` if an invariant is violated
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> StorytellerResult<Self> {
        let path = path.as_ref();

        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(PipelineError::new(PipelineErrorKind::MissingInput(
                path.display().to_string(),
            ))
            .into());
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            PipelineError::new(PipelineErrorKind::InputRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let collection: StoryCollection = serde_json::from_slice(&bytes).map_err(|e| {
            JsonError::new(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        collection.validate()?;

        debug!(stories = collection.len(), "Loaded story document");
        Ok(collection)
    }

    /// Serialize as pretty JSON with four-space indentation.
    pub fn to_pretty_json(&self) -> StorytellerResult<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| JsonError::new(format!("Failed to serialize stories: {}", e)))?;
        Ok(buffer)
    }

    /// Write the whole document, replacing any existing file.
    ///
    /// Parent directories are created as needed.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), stories = self.len()))]
    pub async fn save(&self, path: impl AsRef<Path>) -> StorytellerResult<()> {
        let path = path.as_ref();
        let data = self.to_pretty_json()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                write_failed(format!("create {}: {}", parent.display(), e))
            })?;
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &data)
            .await
            .map_err(|e| write_failed(format!("{}: {}", temp_path.display(), e)))?;
        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            write_failed(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            ))
        })?;

        info!(size = data.len(), "Wrote story document");
        Ok(())
    }
}

impl From<Vec<Story>> for StoryCollection {
    fn from(stories: Vec<Story>) -> Self {
        Self::new(stories)
    }
}

fn check_timings(timings: &[WordTiming]) -> Result<(), String> {
    match timings.iter().find(|t| !t.is_well_formed()) {
        Some(bad) => Err(bad.word.clone()),
        None => Ok(()),
    }
}

#[track_caller]
fn invalid(message: String) -> storyteller_error::StorytellerError {
    PipelineError::new(PipelineErrorKind::InvalidDocument(message)).into()
}

#[track_caller]
fn write_failed(message: String) -> storyteller_error::StorytellerError {
    PipelineError::new(PipelineErrorKind::DocumentWrite(message)).into()
}
