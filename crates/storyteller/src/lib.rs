//! Storyteller - data preparation for an interactive children's story app.
//!
//! Turns a plain-text anthology into a JSON story document in three stages:
//!
//! 1. **Segment** - split the anthology into stories and paragraph segments
//! 2. **Enrich** - ask a local language model for summaries, morals, pause
//!    points and guided questions
//! 3. **Narrate** - synthesize narration audio with per-word timing
//!
//! Each stage reads the whole document, updates it in place, and rewrites it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storyteller::{StorytellerConfig, stages};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorytellerConfig::load(None)?;
//!
//!     stages::segment(&config).await?;
//!     let report = stages::enrich(&config).await?;
//!     println!("{} units failed", report.failed_count());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `storyteller_error` - Error types
//! - `storyteller_core` - Story records and backend request types
//! - `storyteller_interface` - `TextGenerator` and `SpeechSynthesizer` traits
//! - `storyteller_config` - Layered configuration
//! - `storyteller_storage` - Narration artifact storage
//! - `storyteller_models` - Ollama and Google Text-to-Speech clients
//! - `storyteller_pipeline` - The stages
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod stages;
mod telemetry;

pub use telemetry::{LogFormat, init_logging};

// Error types
pub use storyteller_error::{
    BackendError, BuilderError, ConfigError, FailureClass, HttpError, JsonError, PipelineError,
    PipelineErrorKind, StorageError, StorageErrorKind, StorytellerError, StorytellerErrorKind,
    StorytellerResult,
};

// Records and request types
pub use storyteller_core::{
    AudioEncoding, AudioSettings, GenerateRequest, GenerateResponse, GenerationMetadata,
    GuidedQuestion, ResponseFormat, Segment, SpeechInput, SpeechRequest, SpeechResponse, Story,
    StoryCollection, StructuredQuestion, Timepoint, VoiceGender, VoiceSelection, WordTiming,
};

// Backend seams
pub use storyteller_interface::{SpeechSynthesizer, TextGenerator};

// Configuration
pub use storyteller_config::{
    EnricherConfig, NarratorConfig, OllamaConfig, PathsConfig, StorytellerConfig, TtsConfig,
};

// Storage
pub use storyteller_storage::{AudioKey, AudioStorage, FileSystemStorage};

// Backends
pub use storyteller_models::{GoogleCredentials, GoogleTtsClient, OllamaClient};

// Stages
pub use storyteller_pipeline::{
    Enricher, Narrator, Pacer, PromptTemplate, RunReport, Segmenter, Stage, UnitId, UnitOutcome,
    UnitStatus,
};
