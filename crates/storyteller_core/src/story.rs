//! Story and segment records.

use crate::{GuidedQuestion, WordTiming};
use serde::{Deserialize, Serialize};

/// One complete narrative unit of the anthology.
///
/// `full_text` is fixed at creation; later stages only fill in or replace
/// `summary`, `moral`, and the per-segment enrichment and audio fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Number from the source header; unique and defines presentation order
    pub story_number: u32,
    /// Title from the source header
    pub title: String,
    /// Untouched story body
    pub full_text: String,
    /// Short summary (a truncated prefix until generated)
    pub summary: String,
    /// Moral lesson (a placeholder until generated)
    pub moral: String,
    /// Paragraph-level segments in source order
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Story {
    /// Look up a segment by its id.
    pub fn segment(&self, segment_id: u32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.segment_id == segment_id)
    }

    /// Look up a segment by its id, mutably.
    pub fn segment_mut(&mut self, segment_id: u32) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| s.segment_id == segment_id)
    }
}

/// One paragraph-level unit of narration within a story.
///
/// # Examples
///
/// ```
/// use storyteller_core::Segment;
///
/// let segment = Segment::new(1, "Once upon a time there lived a lion.");
/// assert!(!segment.pause_after);
/// assert!(segment.guided_questions.is_empty());
/// assert!(!segment.is_narrated());
///
/// // Fresh segments serialize only the four segmenter fields
/// let json = serde_json::to_value(&segment).unwrap();
/// assert!(json.get("audio_path").is_none());
/// assert!(json.get("timestamps").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position within the story
    pub segment_id: u32,
    /// Paragraph text
    pub segment_text: String,
    /// Whether playback should pause for interaction after this segment
    #[serde(default)]
    pub pause_after: bool,
    /// Comprehension questions asked at the pause
    #[serde(default)]
    pub guided_questions: Vec<GuidedQuestion>,
    /// Public path of the synthesized narration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
    /// Per-word timing of the narration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timestamps: Vec<WordTiming>,
}

impl Segment {
    /// Create an unenriched, unnarrated segment.
    pub fn new(segment_id: u32, segment_text: impl Into<String>) -> Self {
        Self {
            segment_id,
            segment_text: segment_text.into(),
            pause_after: false,
            guided_questions: Vec::new(),
            audio_path: None,
            timestamps: Vec::new(),
        }
    }

    /// Whitespace-delimited words of the segment text.
    pub fn words(&self) -> Vec<&str> {
        self.segment_text.split_whitespace().collect()
    }

    /// Audio recorded and timing derived.
    pub fn is_narrated(&self) -> bool {
        self.audio_path.is_some() && !self.timestamps.is_empty()
    }

    /// Upgrade every plain guided question to the structured shape.
    pub fn normalize_questions(&mut self) {
        for question in &mut self.guided_questions {
            question.normalize();
        }
    }

    /// Mark the segment as not synthesized.
    pub fn clear_audio(&mut self) {
        self.audio_path = None;
        self.timestamps.clear();
    }
}
