//! Word-level timing metadata.

use serde::{Deserialize, Serialize};

/// Start and end offset of one narrated word, in seconds from the start of the clip.
///
/// # Examples
///
/// ```
/// use storyteller_core::WordTiming;
///
/// let timing = WordTiming::new("jackal", 1.5, 1.9);
/// assert!(timing.is_well_formed());
/// assert!((timing.duration() - 0.4).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    /// The literal whitespace-delimited token from the segment text
    pub word: String,
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
}

impl WordTiming {
    /// Create a new timing entry.
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }

    /// Length of the word in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Offsets are finite, non-negative, and `end >= start`.
    pub fn is_well_formed(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start >= 0.0 && self.end >= self.start
    }
}
