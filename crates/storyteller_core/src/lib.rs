//! Core data types for the Storyteller pipeline.
//!
//! This crate provides the story record model shared by every stage
//! (segmenting, enrichment, narration) and the request/response types
//! exchanged with the text-generation and speech backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod question;
mod request;
mod speech;
mod story;
mod timing;

pub use collection::StoryCollection;
pub use question::{GuidedQuestion, StructuredQuestion};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse,
    GenerationMetadata, ResponseFormat,
};
pub use speech::{
    AudioEncoding, AudioSettings, SpeechInput, SpeechRequest, SpeechRequestBuilder,
    SpeechRequestBuilderError, SpeechResponse, Timepoint, VoiceGender, VoiceSelection,
};
pub use story::{Segment, Story};
pub use timing::WordTiming;
