//! Trait definitions for text-generation and speech backends.

use async_trait::async_trait;
use storyteller_core::{GenerateRequest, GenerateResponse, SpeechRequest, SpeechResponse};
use storyteller_error::StorytellerResult;

/// Core trait that all text-generation backends implement.
///
/// One prompt in, one piece of generated text out. Whether that text is the
/// JSON the prompt asked for is the caller's problem.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt.
    ///
    /// # Errors
    ///
    /// `HttpError` when the backend cannot be reached, `BackendError` when it
    /// answers with a non-success status.
    async fn generate(&self, req: &GenerateRequest) -> StorytellerResult<GenerateResponse>;

    /// Provider name (e.g., "ollama").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "mistral").
    fn model_name(&self) -> &str;
}

/// Trait for speech backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize audio, reporting mark timepoints when the request asks for them.
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<SpeechResponse>;

    /// Provider name (e.g., "google").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<'a, T: TextGenerator + ?Sized> TextGenerator for &'a T {
    async fn generate(&self, req: &GenerateRequest) -> StorytellerResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<'a, T: SpeechSynthesizer + ?Sized> SpeechSynthesizer for &'a T {
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<SpeechResponse> {
        (**self).synthesize(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
