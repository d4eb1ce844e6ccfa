//! Configuration structures and layered loading.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use storyteller_core::{AudioSettings, VoiceSelection};
use storyteller_error::{ConfigError, StorytellerError, StorytellerResult};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../storyteller.toml");

/// File locations shared by the three stages.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Plain-text anthology read by the segmenter
    pub source_text: PathBuf,
    /// Story document written by the segmenter and updated in place by later stages
    pub stories_json: PathBuf,
    /// Root directory for narration artifacts
    pub audio_dir: PathBuf,
    /// Prefix of the `audio_path` values recorded in the document
    pub public_audio_prefix: String,
    /// Optional JSON-lines file receiving one record per processed unit
    #[serde(default)]
    pub status_log: Option<PathBuf>,
}

/// Local language model server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OllamaConfig {
    /// Base URL of the server
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl OllamaConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Enrichment pacing and prompt templates.
///
/// Templates substitute `{title}`, `{full_text}` and `{segment_text}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnricherConfig {
    /// Pause after each segment-level request, in milliseconds
    pub segment_delay_ms: u64,
    /// Pause after each story, in milliseconds
    pub story_delay_ms: u64,
    /// Override for the story-level (summary and moral) prompt
    #[serde(default)]
    pub story_prompt: Option<String>,
    /// Override for the segment-level (pause and questions) prompt
    #[serde(default)]
    pub segment_prompt: Option<String>,
}

impl EnricherConfig {
    /// Pause after each segment-level request.
    pub fn segment_delay(&self) -> Duration {
        Duration::from_millis(self.segment_delay_ms)
    }

    /// Pause after each story.
    pub fn story_delay(&self) -> Duration {
        Duration::from_millis(self.story_delay_ms)
    }
}

/// Cloud speech service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TtsConfig {
    /// Full URL of the synthesize endpoint
    pub endpoint: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Narrating voice
    pub voice: VoiceSelection,
    /// Encoding and prosody
    pub audio: AudioSettings,
}

impl TtsConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Narration scope and alignment parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NarratorConfig {
    /// Number of leading stories to narrate; 0 narrates all
    pub story_limit: usize,
    /// Pause after each synthesis request, in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,
    /// Duration assigned to the last word of a segment, in seconds
    pub last_word_pad_secs: f64,
}

impl NarratorConfig {
    /// Story limit, `None` when every story is narrated.
    pub fn story_limit(&self) -> Option<usize> {
        (self.story_limit > 0).then_some(self.story_limit)
    }

    /// Pause after each synthesis request.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// Top-level Storyteller configuration.
///
/// # Example
///
/// ```
/// use storyteller_config::StorytellerConfig;
///
/// let config = StorytellerConfig::defaults().unwrap();
/// assert_eq!(config.ollama.model, "mistral");
/// assert_eq!(config.narrator.story_limit(), Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorytellerConfig {
    /// File locations
    pub paths: PathsConfig,
    /// Text-generation backend
    pub ollama: OllamaConfig,
    /// Enrichment stage
    pub enricher: EnricherConfig,
    /// Speech backend
    pub tts: TtsConfig,
    /// Narration stage
    pub narrator: NarratorConfig,
}

impl StorytellerConfig {
    /// The bundled defaults alone, ignoring user files and the environment.
    pub fn defaults() -> StorytellerResult<Self> {
        Self::from_toml_str("")
    }

    /// Bundled defaults overlaid with a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or fails validation.
    pub fn from_toml_str(overrides: &str) -> StorytellerResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Bundled defaults overlaid with a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StorytellerResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()).required(true));
        Self::finish(builder)
    }

    /// Load configuration with precedence: environment > explicit file >
    /// current dir > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped if not found; an
    /// explicit file must exist.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> StorytellerResult<Self> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyteller/storyteller.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyteller").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("STORYTELLER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> StorytellerResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                StorytellerError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StorytellerError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no backend would accept.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first offending key.
    pub fn validate(&self) -> StorytellerResult<()> {
        if self.ollama.endpoint.trim().is_empty() {
            return Err(ConfigError::new("ollama.endpoint must not be empty").into());
        }
        if self.ollama.model.trim().is_empty() {
            return Err(ConfigError::new("ollama.model must not be empty").into());
        }
        if self.tts.endpoint.trim().is_empty() {
            return Err(ConfigError::new("tts.endpoint must not be empty").into());
        }
        let rate = self.tts.audio.speaking_rate;
        if !(0.25..=4.0).contains(&rate) {
            return Err(ConfigError::new(format!(
                "tts.audio.speaking_rate must be in [0.25, 4.0], got {}",
                rate
            ))
            .into());
        }
        let pitch = self.tts.audio.pitch;
        if !(-20.0..=20.0).contains(&pitch) {
            return Err(ConfigError::new(format!(
                "tts.audio.pitch must be in [-20.0, 20.0], got {}",
                pitch
            ))
            .into());
        }
        let pad = self.narrator.last_word_pad_secs;
        if !pad.is_finite() || pad < 0.0 {
            return Err(ConfigError::new(format!(
                "narrator.last_word_pad_secs must be non-negative, got {}",
                pad
            ))
            .into());
        }
        Ok(())
    }
}
