//! Test utilities for pipeline tests.
//!
//! Mock backends that script their responses and count calls, plus record
//! builders.

#![allow(dead_code)]

pub mod mock_generator;
pub mod mock_synthesizer;

pub use mock_generator::{MockGenerator, MockResponse};
pub use mock_synthesizer::{MOCK_AUDIO, MockSpeech, MockSynthesizer};

use storyteller_core::{GuidedQuestion, Segment, Story, VoiceGender, VoiceSelection};

/// A story with one segment per entry of `paragraphs`.
pub fn story(story_number: u32, paragraphs: &[&str]) -> Story {
    let full_text = paragraphs.join("\n\n");
    Story {
        story_number,
        title: format!("Story number {}", story_number),
        summary: full_text.clone(),
        moral: "Moral to be generated later.".to_string(),
        full_text,
        segments: paragraphs
            .iter()
            .zip(1u32..)
            .map(|(text, id)| Segment::new(id, *text))
            .collect(),
    }
}

/// A story whose only segment carries plain questions.
pub fn story_with_questions(story_number: u32, text: &str, questions: &[&str]) -> Story {
    let mut story = story(story_number, &[text]);
    story.segments[0].pause_after = true;
    story.segments[0].guided_questions =
        questions.iter().map(|q| GuidedQuestion::from(*q)).collect();
    story
}

/// The default narrating voice.
pub fn voice() -> VoiceSelection {
    VoiceSelection {
        language_code: "en-IN".to_string(),
        name: "en-IN-Standard-A".to_string(),
        gender: VoiceGender::Female,
    }
}
