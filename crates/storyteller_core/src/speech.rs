//! Request and response types for speech synthesis.

use serde::{Deserialize, Serialize};

/// Text submitted for synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechInput {
    /// Plain text
    Text(String),
    /// SSML markup, optionally carrying `<mark>` elements
    Ssml(String),
}

/// Voice gender requested from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceGender {
    /// Female voice
    #[default]
    Female,
    /// Male voice
    Male,
    /// Gender-neutral voice
    Neutral,
}

/// Which voice narrates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceSelection {
    /// BCP-47 language code, e.g. `en-IN`
    pub language_code: String,
    /// Backend voice name, e.g. `en-IN-Standard-A`
    pub name: String,
    /// Voice gender
    #[serde(default)]
    pub gender: VoiceGender,
}

/// Encoded audio container returned by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// MPEG layer 3
    #[default]
    Mp3,
    /// Ogg container with Opus codec
    OggOpus,
    /// Uncompressed 16-bit PCM with WAV header
    Linear16,
}

impl AudioEncoding {
    /// File extension used for artifacts of this encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyteller_core::AudioEncoding;
    ///
    /// assert_eq!(AudioEncoding::Mp3.extension(), "mp3");
    /// assert_eq!(AudioEncoding::Mp3.to_string(), "MP3");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            AudioEncoding::OggOpus => "ogg",
            AudioEncoding::Linear16 => "wav",
        }
    }
}

/// Encoding and prosody parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Output encoding
    #[serde(default)]
    pub encoding: AudioEncoding,
    /// Speaking rate, 1.0 is the voice's natural speed
    pub speaking_rate: f64,
    /// Pitch shift in semitones
    pub pitch: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::Mp3,
            speaking_rate: 1.0,
            pitch: 0.0,
        }
    }
}

/// A synthesis request.
///
/// # Examples
///
/// ```
/// use storyteller_core::{SpeechInput, SpeechRequest, VoiceSelection, VoiceGender};
///
/// let request = SpeechRequest::builder()
///     .input(SpeechInput::Ssml("<speak>Hello</speak>".to_string()))
///     .voice(VoiceSelection {
///         language_code: "en-IN".to_string(),
///         name: "en-IN-Standard-A".to_string(),
///         gender: VoiceGender::Female,
///     })
///     .build()
///     .unwrap();
///
/// assert!(!request.mark_timepoints);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct SpeechRequest {
    /// Text or SSML to narrate
    pub input: SpeechInput,
    /// Voice selection
    pub voice: VoiceSelection,
    /// Encoding and prosody
    #[builder(default)]
    pub audio: AudioSettings,
    /// Ask the backend to report the elapsed time of every `<mark>`
    #[builder(default)]
    pub mark_timepoints: bool,
}

impl SpeechRequest {
    /// Creates a new request builder.
    pub fn builder() -> SpeechRequestBuilder {
        SpeechRequestBuilder::default()
    }
}

/// Elapsed time at which a named `<mark>` was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timepoint {
    /// The `name` attribute of the mark
    pub mark_name: String,
    /// Seconds from the start of the audio
    pub seconds: f64,
}

impl Timepoint {
    /// Create a timepoint.
    pub fn new(mark_name: impl Into<String>, seconds: f64) -> Self {
        Self {
            mark_name: mark_name.into(),
            seconds,
        }
    }
}

/// Synthesized audio plus mark timepoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpeechResponse {
    /// Encoded audio bytes
    pub audio: Vec<u8>,
    /// Mark timepoints in the order reported by the backend
    pub timepoints: Vec<Timepoint>,
}
