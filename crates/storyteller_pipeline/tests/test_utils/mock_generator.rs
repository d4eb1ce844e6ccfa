//! Mock text generator for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use storyteller_core::{GenerateRequest, GenerateResponse, GenerationMetadata};
use storyteller_error::{BackendError, HttpError, StorytellerResult};
use storyteller_interface::TextGenerator;

/// A single scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail as if the server were unreachable
    Unreachable,
    /// Fail as if the server answered with this status
    Status(u16),
}

impl MockResponse {
    /// Text response from a JSON value.
    pub fn json(value: serde_json::Value) -> Self {
        Self::Text(value.to_string())
    }
}

/// Mock generator replaying a script; once the script runs out it repeats
/// the fallback.
///
/// Clones share the script, call count and prompt log.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    fallback: MockResponse,
    prompts: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockGenerator {
    /// Always answer with `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self::with_fallback(Vec::new(), MockResponse::Text(text.into()))
    }

    /// Always fail as unreachable.
    pub fn unreachable() -> Self {
        Self::with_fallback(Vec::new(), MockResponse::Unreachable)
    }

    /// Replay `responses` in order, then fail as unreachable.
    pub fn sequence(responses: Vec<MockResponse>) -> Self {
        Self::with_fallback(responses, MockResponse::Unreachable)
    }

    /// Replay `responses` in order, then repeat `fallback`.
    pub fn with_fallback(responses: Vec<MockResponse>, fallback: MockResponse) -> Self {
        Self {
            script: Arc::new(Mutex::new(responses.into())),
            fallback,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of generate calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, req: &GenerateRequest) -> StorytellerResult<GenerateResponse> {
        self.prompts.lock().unwrap().push(req.clone());

        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match next {
            MockResponse::Text(text) => Ok(GenerateResponse::new(
                text,
                GenerationMetadata {
                    model: Some("mock-model".to_string()),
                    done: true,
                    ..Default::default()
                },
            )),
            MockResponse::Unreachable => Err(HttpError::new("connection refused").into()),
            MockResponse::Status(status) => {
                Err(BackendError::with_status(status, "mock backend error").into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
