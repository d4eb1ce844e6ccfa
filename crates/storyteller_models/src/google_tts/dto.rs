//! `text:synthesize` data transfer objects.
//!
//! Field names follow the REST API's camelCase JSON.

use serde::{Deserialize, Serialize};
use storyteller_core::{AudioEncoding, VoiceGender};

/// Input text; exactly one of the fields is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SynthesisInput {
    /// Plain text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// SSML document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssml: Option<String>,
}

/// Voice parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsVoice {
    /// BCP-47 language code
    pub language_code: String,
    /// Voice name
    pub name: String,
    /// Requested gender
    pub ssml_gender: VoiceGender,
}

/// Output encoding and prosody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsAudioConfig {
    /// Output encoding
    pub audio_encoding: AudioEncoding,
    /// Speaking rate
    pub speaking_rate: f64,
    /// Pitch in semitones
    pub pitch: f64,
}

/// Which timepoints the service should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimepointType {
    /// One timepoint per `<mark>` element
    SsmlMark,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    /// Text to narrate
    pub input: SynthesisInput,
    /// Voice
    pub voice: TtsVoice,
    /// Encoding and prosody
    pub audio_config: TtsAudioConfig,
    /// Timepoint reporting
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enable_time_pointing: Vec<TimepointType>,
}

/// A reported mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsTimepoint {
    /// Mark name
    pub mark_name: String,
    /// Seconds from the start of the audio
    pub time_seconds: f64,
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResponse {
    /// Base64-encoded audio
    pub audio_content: String,
    /// Mark timepoints; absent when none were requested
    #[serde(default)]
    pub timepoints: Vec<TtsTimepoint>,
}
