//! Ollama `/api/generate` data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyteller_core::{GenerateResponse, GenerationMetadata};

/// Body of a non-streaming `/api/generate` call.
///
/// # Examples
///
/// ```
/// use storyteller_models::OllamaGenerateRequest;
///
/// let body = OllamaGenerateRequest::builder()
///     .model("mistral")
///     .prompt("Say hi")
///     .format(Some("json".to_string()))
///     .build()
///     .unwrap();
///
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["stream"], false);
/// assert_eq!(json["format"], "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct OllamaGenerateRequest {
    /// Model name
    model: String,
    /// Prompt text
    prompt: String,
    /// Streaming is always disabled; the pipeline wants one complete document
    #[builder(default = "false")]
    stream: bool,
    /// Output format constraint (`"json"`)
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

impl OllamaGenerateRequest {
    /// Creates a new builder for `OllamaGenerateRequest`.
    pub fn builder() -> OllamaGenerateRequestBuilder {
        OllamaGenerateRequestBuilder::default()
    }
}

/// Reply to a non-streaming `/api/generate` call.
///
/// Only `response` is required; the remaining fields are informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct OllamaGenerateResponse {
    /// Generated text
    response: String,
    /// Model that answered
    #[serde(default)]
    model: Option<String>,
    /// Whether generation finished
    #[serde(default)]
    done: bool,
    /// Total time spent, in nanoseconds
    #[serde(default)]
    total_duration: Option<u64>,
    /// Number of generated tokens
    #[serde(default)]
    eval_count: Option<u64>,
}

impl From<OllamaGenerateResponse> for GenerateResponse {
    fn from(r: OllamaGenerateResponse) -> Self {
        GenerateResponse::new(
            r.response,
            GenerationMetadata {
                model: r.model,
                done: r.done,
                total_duration_ns: r.total_duration,
                eval_count: r.eval_count,
            },
        )
    }
}
