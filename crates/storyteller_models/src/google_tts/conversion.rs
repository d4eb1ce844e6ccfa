//! Conversions between Storyteller speech types and the REST DTOs.

use super::{
    SynthesisInput, SynthesizeRequest, SynthesizeResponse, TimepointType, TtsAudioConfig,
    TtsVoice,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use storyteller_core::{SpeechInput, SpeechRequest, SpeechResponse, Timepoint};
use storyteller_error::{JsonError, StorytellerResult};

/// Build the `text:synthesize` body for a request.
///
/// # Examples
///
/// ```
/// use storyteller_core::{SpeechInput, SpeechRequest, VoiceGender, VoiceSelection};
/// use storyteller_models::to_synthesize_request;
///
/// let request = SpeechRequest::builder()
///     .input(SpeechInput::Text("Hello".to_string()))
///     .voice(VoiceSelection {
///         language_code: "en-IN".to_string(),
///         name: "en-IN-Standard-A".to_string(),
///         gender: VoiceGender::Female,
///     })
///     .build()
///     .unwrap();
///
/// let body = serde_json::to_value(to_synthesize_request(&request)).unwrap();
/// assert_eq!(body["input"]["text"], "Hello");
/// assert_eq!(body["voice"]["ssmlGender"], "FEMALE");
/// assert!(body.get("enableTimePointing").is_none());
/// ```
pub fn to_synthesize_request(req: &SpeechRequest) -> SynthesizeRequest {
    let input = match &req.input {
        SpeechInput::Text(text) => SynthesisInput {
            text: Some(text.clone()),
            ssml: None,
        },
        SpeechInput::Ssml(ssml) => SynthesisInput {
            text: None,
            ssml: Some(ssml.clone()),
        },
    };

    let enable_time_pointing = if req.mark_timepoints {
        vec![TimepointType::SsmlMark]
    } else {
        Vec::new()
    };

    SynthesizeRequest {
        input,
        voice: TtsVoice {
            language_code: req.voice.language_code.clone(),
            name: req.voice.name.clone(),
            ssml_gender: req.voice.gender,
        },
        audio_config: TtsAudioConfig {
            audio_encoding: req.audio.encoding,
            speaking_rate: req.audio.speaking_rate,
            pitch: req.audio.pitch,
        },
        enable_time_pointing,
    }
}

/// Decode the audio payload and collect timepoints in reported order.
///
/// # Errors
///
/// Returns `JsonError` if `audioContent` is not valid base64.
pub fn from_synthesize_response(resp: SynthesizeResponse) -> StorytellerResult<SpeechResponse> {
    let audio = STANDARD
        .decode(resp.audio_content.as_bytes())
        .map_err(|e| JsonError::new(format!("audioContent is not valid base64: {}", e)))?;

    let timepoints = resp
        .timepoints
        .into_iter()
        .map(|tp| Timepoint::new(tp.mark_name, tp.time_seconds))
        .collect();

    Ok(SpeechResponse { audio, timepoints })
}
