//! Trait definitions for the Storyteller pipeline.
//!
//! The stages talk to remote services only through these traits, so a
//! language model or speech service can be swapped (or mocked in tests)
//! without touching the segment, enrich, or narrate logic.

mod traits;

pub use traits::{SpeechSynthesizer, TextGenerator};
