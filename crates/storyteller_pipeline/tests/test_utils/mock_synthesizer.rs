//! Mock speech synthesizer for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use storyteller_core::{SpeechInput, SpeechRequest, SpeechResponse, Timepoint};
use storyteller_error::{HttpError, StorytellerResult};
use storyteller_interface::SpeechSynthesizer;

/// Audio returned by the mock.
pub const MOCK_AUDIO: &[u8] = b"ID3mock-audio";

/// A single scripted synthesis.
#[derive(Debug, Clone)]
pub enum MockSpeech {
    /// Audio plus one timepoint per `<mark>`, `step` seconds apart
    Marked {
        /// Seconds between consecutive marks
        step: f64,
    },
    /// Audio plus exactly these timepoints
    Timepoints(Vec<Timepoint>),
    /// Fail as if the service were unreachable
    Unreachable,
}

/// Mock synthesizer replaying a script; once it runs out it repeats the
/// fallback. Clones share state.
#[derive(Debug, Clone)]
pub struct MockSynthesizer {
    script: Arc<Mutex<VecDeque<MockSpeech>>>,
    fallback: MockSpeech,
    requests: Arc<Mutex<Vec<SpeechRequest>>>,
}

impl MockSynthesizer {
    /// Succeed on every call with marks 0.5 seconds apart.
    pub fn working() -> Self {
        Self::with_fallback(Vec::new(), MockSpeech::Marked { step: 0.5 })
    }

    /// Fail every call.
    pub fn unreachable() -> Self {
        Self::with_fallback(Vec::new(), MockSpeech::Unreachable)
    }

    /// Replay `script`, then repeat `fallback`.
    pub fn with_fallback(script: Vec<MockSpeech>, fallback: MockSpeech) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            fallback,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of synthesize calls made.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn mark_count(input: &SpeechInput) -> usize {
    match input {
        SpeechInput::Ssml(ssml) => ssml.matches("<mark name=\"").count(),
        SpeechInput::Text(_) => 0,
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<SpeechResponse> {
        self.requests.lock().unwrap().push(req.clone());

        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match next {
            MockSpeech::Marked { step } => {
                let timepoints = if req.mark_timepoints {
                    (0..mark_count(&req.input))
                        .map(|i| Timepoint::new(format!("word_{}", i), i as f64 * step))
                        .collect()
                } else {
                    Vec::new()
                };
                Ok(SpeechResponse {
                    audio: MOCK_AUDIO.to_vec(),
                    timepoints,
                })
            }
            MockSpeech::Timepoints(timepoints) => Ok(SpeechResponse {
                audio: MOCK_AUDIO.to_vec(),
                timepoints,
            }),
            MockSpeech::Unreachable => Err(HttpError::new("speech service unreachable").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
