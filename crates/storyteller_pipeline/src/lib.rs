//! The three Storyteller stages.
//!
//! - [`Segmenter`] parses the plain-text anthology into story and segment records.
//! - [`Enricher`] asks a [`TextGenerator`](storyteller_interface::TextGenerator)
//!   for summaries, morals, pause points and guided questions.
//! - [`Narrator`] synthesizes narration through a
//!   [`SpeechSynthesizer`](storyteller_interface::SpeechSynthesizer) and records
//!   per-word timing.
//!
//! Every stage works on a [`StoryCollection`](storyteller_core::StoryCollection)
//! held in memory; the caller loads and saves the document around it.
//! Failures of individual units are recovered locally and recorded in a
//! [`RunReport`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod alignment;
mod enricher;
mod extraction;
mod insight;
mod narrator;
mod pacer;
mod prompts;
mod report;
mod segmenter;
mod ssml;

pub use alignment::align_word_timings;
pub use enricher::Enricher;
pub use extraction::{extract_json, parse_json};
pub use insight::{SegmentInsight, StoryInsight};
pub use narrator::Narrator;
pub use pacer::Pacer;
pub use prompts::{DEFAULT_SEGMENT_PROMPT, DEFAULT_STORY_PROMPT, PromptTemplate};
pub use report::{RunReport, Stage, UnitId, UnitOutcome, UnitStatus};
pub use segmenter::{MORAL_PLACEHOLDER, SUMMARY_CHARS, Segmenter};
pub use ssml::{escape_ssml, mark_name, marked_ssml, plain_ssml};
