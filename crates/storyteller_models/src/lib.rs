//! Backend integrations for Storyteller.
//!
//! Two backends are provided, each speaking its service's REST API directly
//! over `reqwest`:
//!
//! - **Ollama** - local text generation, used for summaries, morals and
//!   guided questions
//! - **Google Cloud Text-to-Speech** - narration with per-word `<mark>`
//!   timepoints
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use storyteller_core::GenerateRequest;
//! use storyteller_interface::TextGenerator;
//! use storyteller_models::OllamaClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new("http://localhost:11434", "mistral", Duration::from_secs(300))?;
//! let request = GenerateRequest::builder()
//!     .prompt("Reply with {\"greeting\": \"hello\"}")
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod google_tts;
mod ollama;

pub use google_tts::{
    GoogleCredentials, GoogleTtsClient, SynthesisInput, SynthesizeRequest, SynthesizeResponse,
    TimepointType, TtsAudioConfig, TtsTimepoint, TtsVoice, from_synthesize_response,
    to_synthesize_request,
};
pub use ollama::{
    OllamaClient, OllamaGenerateRequest, OllamaGenerateRequestBuilder, OllamaGenerateResponse,
};
