//! Ollama HTTP client.

use super::{OllamaGenerateRequest, OllamaGenerateResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use storyteller_core::{GenerateRequest, GenerateResponse, ResponseFormat};
use storyteller_error::{BackendError, BuilderError, HttpError, JsonError, StorytellerResult};
use storyteller_interface::TextGenerator;
use tracing::{debug, info, instrument};

/// Ollama client for local model execution.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    /// Model name (e.g., "mistral", "llama3")
    model_name: String,
    /// Ollama server URL
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the server at `base_url`.
    ///
    /// `timeout` bounds each whole request; local models can take minutes
    /// on long stories.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(name = "ollama_client_new", skip_all)]
    pub fn new(
        base_url: impl Into<String>,
        model_name: impl Into<String>,
        timeout: Duration,
    ) -> StorytellerResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model_name = model_name.into();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        info!(model = %model_name, url = %base_url, "Creating Ollama client");

        Ok(Self {
            client,
            model_name,
            base_url,
        })
    }

    /// Server URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn to_ollama_request(&self, req: &GenerateRequest) -> StorytellerResult<OllamaGenerateRequest> {
        let format = match req.format {
            ResponseFormat::Json => Some("json".to_string()),
            ResponseFormat::Text => None,
        };
        OllamaGenerateRequest::builder()
            .model(req.model.clone().unwrap_or_else(|| self.model_name.clone()))
            .prompt(req.prompt.clone())
            .format(format)
            .build()
            .map_err(|e| BuilderError::new(format!("Ollama request: {}", e)).into())
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    #[instrument(skip(self, req), fields(model = %self.model_name, prompt_len = req.prompt.len()))]
    async fn generate(&self, req: &GenerateRequest) -> StorytellerResult<GenerateResponse> {
        let body = self.to_ollama_request(req)?;
        let url = format!("{}/api/generate", self.base_url);
        debug!(url = %url, "Sending Ollama generate request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::with_status(
                status,
                format!("Ollama returned {}: {}", status, error_text),
            )
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read Ollama response: {}", e)))?;

        let parsed: OllamaGenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|e| JsonError::new(format!("Failed to parse Ollama response: {}", e)))?;

        debug!(
            chars = parsed.response().len(),
            eval_count = ?parsed.eval_count(),
            "Received Ollama response"
        );
        Ok(parsed.into())
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
