//! Google Cloud Text-to-Speech HTTP client.

use super::{SynthesizeResponse, from_synthesize_response, to_synthesize_request};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use storyteller_core::{SpeechRequest, SpeechResponse};
use storyteller_error::{BackendError, ConfigError, HttpError, JsonError, StorytellerResult};
use storyteller_interface::SpeechSynthesizer;
use tracing::{debug, info, instrument};

/// Environment variable holding an API key.
const API_KEY_VAR: &str = "GOOGLE_TTS_API_KEY";
/// Environment variable holding an OAuth access token.
const ACCESS_TOKEN_VAR: &str = "GOOGLE_TTS_ACCESS_TOKEN";

/// How requests are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum GoogleCredentials {
    /// API key, sent as the `key` query parameter
    ApiKey(String),
    /// OAuth access token, sent as a bearer token
    AccessToken(String),
}

impl GoogleCredentials {
    /// Read credentials from `GOOGLE_TTS_API_KEY`, falling back to
    /// `GOOGLE_TTS_ACCESS_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if neither variable is set.
    pub fn from_env() -> StorytellerResult<Self> {
        let read = |var: &str| std::env::var(var).ok().filter(|v| !v.trim().is_empty());

        if let Some(key) = read(API_KEY_VAR) {
            return Ok(Self::ApiKey(key));
        }
        if let Some(token) = read(ACCESS_TOKEN_VAR) {
            return Ok(Self::AccessToken(token));
        }
        Err(ConfigError::new(format!(
            "Neither {} nor {} is set",
            API_KEY_VAR, ACCESS_TOKEN_VAR
        ))
        .into())
    }
}

impl std::fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
            Self::AccessToken(_) => f.write_str("AccessToken(..)"),
        }
    }
}

/// Google Cloud Text-to-Speech client.
#[derive(Debug, Clone)]
pub struct GoogleTtsClient {
    client: Client,
    endpoint: String,
    credentials: GoogleCredentials,
}

impl GoogleTtsClient {
    /// Create a client posting to `endpoint` (the full `text:synthesize` URL).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(name = "google_tts_client_new", skip_all)]
    pub fn new(
        endpoint: impl Into<String>,
        credentials: GoogleCredentials,
        timeout: Duration,
    ) -> StorytellerResult<Self> {
        let endpoint = endpoint.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        info!(endpoint = %endpoint, "Creating Google TTS client");

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    /// Create a client with credentials taken from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no credentials are set.
    pub fn from_env(endpoint: impl Into<String>, timeout: Duration) -> StorytellerResult<Self> {
        Self::new(endpoint, GoogleCredentials::from_env()?, timeout)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    #[instrument(skip(self, req), fields(voice = %req.voice.name, marks = req.mark_timepoints))]
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<SpeechResponse> {
        let body = to_synthesize_request(req);

        let builder = self.client.post(&self.endpoint).json(&body);
        let builder = match &self.credentials {
            GoogleCredentials::ApiKey(key) => builder.query(&[("key", key)]),
            GoogleCredentials::AccessToken(token) => builder.bearer_auth(token),
        };

        debug!(endpoint = %self.endpoint, "Sending synthesize request");
        let response = builder
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request to text-to-speech failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::with_status(
                status,
                format!("Text-to-speech returned {}: {}", status, error_text),
            )
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read synthesize response: {}", e)))?;

        let parsed: SynthesizeResponse = serde_json::from_slice(&bytes).map_err(|e| {
            JsonError::new(format!("Failed to parse synthesize response: {}", e))
        })?;

        let speech = from_synthesize_response(parsed)?;
        debug!(
            bytes = speech.audio.len(),
            timepoints = speech.timepoints.len(),
            "Received synthesized audio"
        );
        Ok(speech)
    }

    fn provider_name(&self) -> &'static str {
        "google"
    }
}
