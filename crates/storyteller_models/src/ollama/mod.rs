//! Ollama text-generation backend.

mod client;
mod dto;

pub use client::OllamaClient;
pub use dto::{OllamaGenerateRequest, OllamaGenerateRequestBuilder, OllamaGenerateResponse};
