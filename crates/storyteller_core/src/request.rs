//! Request and response types for text generation.

use serde::{Deserialize, Serialize};

/// Output format hint sent with a generation request.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponseFormat {
    /// Ask the model to answer with a JSON document
    #[default]
    Json,
    /// Free text
    Text,
}

/// A single-prompt generation request.
///
/// # Examples
///
/// ```
/// use storyteller_core::{GenerateRequest, ResponseFormat};
///
/// let request = GenerateRequest::builder()
///     .prompt("Summarize the story.")
///     .model(Some("mistral".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt, "Summarize the story.");
/// assert_eq!(request.format, ResponseFormat::Json);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Model identifier; the backend's configured model when `None`
    #[builder(default)]
    pub model: Option<String>,
    /// Full prompt text
    pub prompt: String,
    /// Response format hint
    #[builder(default)]
    pub format: ResponseFormat,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Backend-reported details about a completed generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model that produced the text
    pub model: Option<String>,
    /// Whether the backend reported the generation as finished
    pub done: bool,
    /// Wall time spent by the backend, in nanoseconds
    pub total_duration_ns: Option<u64>,
    /// Number of generated tokens
    pub eval_count: Option<u64>,
}

/// Generated text plus metadata.
///
/// The text is expected, but not guaranteed, to be a JSON document.
///
/// # Examples
///
/// ```
/// use storyteller_core::{GenerateResponse, GenerationMetadata};
///
/// let response = GenerateResponse::new(r#"{"moral": "Be kind."}"#, GenerationMetadata::default());
/// assert!(response.text().contains("Be kind"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerateResponse {
    /// Generated text
    text: String,
    /// Backend metadata
    metadata: GenerationMetadata,
}

impl GenerateResponse {
    /// Create a response from generated text and metadata.
    pub fn new(text: impl Into<String>, metadata: GenerationMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}
