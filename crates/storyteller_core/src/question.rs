//! Guided comprehension questions attached to a segment.

use crate::WordTiming;
use serde::{Deserialize, Serialize};

/// A guided question in either of its two on-disk shapes.
///
/// The enrichment stage writes questions as plain strings. The narration
/// stage upgrades them to the structured shape, which carries the audio
/// artifact location. Both shapes deserialize from the same JSON array.
///
/// # Examples
///
/// ```
/// use storyteller_core::GuidedQuestion;
///
/// let mut question: GuidedQuestion = serde_json::from_str(r#""Why did the monkey laugh?""#).unwrap();
/// assert!(!question.is_structured());
///
/// question.normalize();
/// question.normalize();
/// assert!(question.is_structured());
/// assert_eq!(question.text(), "Why did the monkey laugh?");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuidedQuestion {
    /// Question text only, as produced by the language model.
    Plain(String),
    /// Question with narration metadata.
    Structured(StructuredQuestion),
}

impl GuidedQuestion {
    /// The question text regardless of shape.
    pub fn text(&self) -> &str {
        match self {
            GuidedQuestion::Plain(text) => text,
            GuidedQuestion::Structured(question) => &question.text,
        }
    }

    /// Whether the question already carries narration metadata.
    pub fn is_structured(&self) -> bool {
        matches!(self, GuidedQuestion::Structured(_))
    }

    /// Upgrade a plain question to the structured shape.
    ///
    /// Structured questions are left untouched, so repeated calls never nest.
    pub fn normalize(&mut self) {
        if let GuidedQuestion::Plain(text) = self {
            let text = std::mem::take(text);
            *self = GuidedQuestion::Structured(StructuredQuestion::new(text));
        }
    }

    /// Borrow the structured form, if the question has been normalized.
    pub fn as_structured_mut(&mut self) -> Option<&mut StructuredQuestion> {
        match self {
            GuidedQuestion::Structured(question) => Some(question),
            GuidedQuestion::Plain(_) => None,
        }
    }
}

impl From<String> for GuidedQuestion {
    fn from(text: String) -> Self {
        GuidedQuestion::Plain(text)
    }
}

impl From<&str> for GuidedQuestion {
    fn from(text: &str) -> Self {
        GuidedQuestion::Plain(text.to_string())
    }
}

/// Structured guided question.
///
/// `timestamps` stays empty by convention; questions are narrated without
/// word-level timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredQuestion {
    /// The question text
    pub text: String,
    /// Public path of the synthesized question audio
    #[serde(default)]
    pub audio_path: Option<String>,
    /// Word timings (always empty for questions)
    #[serde(default)]
    pub timestamps: Vec<WordTiming>,
}

impl StructuredQuestion {
    /// Create a structured question with no audio yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            audio_path: None,
            timestamps: Vec::new(),
        }
    }
}
