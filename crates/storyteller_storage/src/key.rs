//! Artifact keys.

/// Location of one narration artifact, relative to the storage root.
///
/// # Examples
///
/// ```
/// use storyteller_storage::AudioKey;
///
/// assert_eq!(AudioKey::segment(3, 7).relative_path(), "story_3/segment_7.mp3");
/// assert_eq!(
///     AudioKey::question(3, 7, 0).relative_path(),
///     "story_3/segment_7_questions/question_0.mp3"
/// );
/// assert_eq!(
///     AudioKey::segment(1, 1).with_extension("ogg").relative_path(),
///     "story_1/segment_1.ogg"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AudioKey {
    story_number: u32,
    segment_id: u32,
    question: Option<usize>,
    extension: &'static str,
}

impl AudioKey {
    /// Key for a segment's narration.
    pub fn segment(story_number: u32, segment_id: u32) -> Self {
        Self {
            story_number,
            segment_id,
            question: None,
            extension: "mp3",
        }
    }

    /// Key for a guided question's narration; `index` is 0-based.
    pub fn question(story_number: u32, segment_id: u32, index: usize) -> Self {
        Self {
            story_number,
            segment_id,
            question: Some(index),
            extension: "mp3",
        }
    }

    /// Replace the file extension.
    pub fn with_extension(mut self, extension: &'static str) -> Self {
        self.extension = extension;
        self
    }

    /// Story the artifact belongs to.
    pub fn story_number(&self) -> u32 {
        self.story_number
    }

    /// Segment the artifact belongs to.
    pub fn segment_id(&self) -> u32 {
        self.segment_id
    }

    /// Question index, for question artifacts.
    pub fn question_index(&self) -> Option<usize> {
        self.question
    }

    /// Forward-slash path below the storage root.
    pub fn relative_path(&self) -> String {
        match self.question {
            None => format!(
                "story_{}/segment_{}.{}",
                self.story_number, self.segment_id, self.extension
            ),
            Some(index) => format!(
                "story_{}/segment_{}_questions/question_{}.{}",
                self.story_number, self.segment_id, index, self.extension
            ),
        }
    }
}

impl std::fmt::Display for AudioKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.relative_path())
    }
}
