//! Configuration for the Storyteller pipeline.
//!
//! Every path, endpoint, model and voice identifier, pacing delay and
//! processing limit lives here and is handed to each stage at startup.
//! The configuration system supports:
//! - Bundled defaults (the crate's own storyteller.toml, via include_str!)
//! - User overrides (~/.config/storyteller/storyteller.toml, ./storyteller.toml)
//! - An explicit file given on the command line
//! - `STORYTELLER__SECTION__KEY` environment variables

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{
    EnricherConfig, NarratorConfig, OllamaConfig, PathsConfig, StorytellerConfig, TtsConfig,
};
