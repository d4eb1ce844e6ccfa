//! Tests against real backends.
//!
//! Requires Ollama running locally with the mistral model pulled, and
//! `GOOGLE_TTS_API_KEY` (or `GOOGLE_TTS_ACCESS_TOKEN`) set for speech.
//!
//! Run with: cargo test --package storyteller_models --features api -- --ignored

#![cfg(feature = "api")]

use std::time::Duration;
use storyteller_core::{
    AudioSettings, GenerateRequest, SpeechInput, SpeechRequest, VoiceGender, VoiceSelection,
};
use storyteller_interface::{SpeechSynthesizer, TextGenerator};
use storyteller_models::{GoogleTtsClient, OllamaClient};

#[tokio::test]
#[ignore] // Requires Ollama running locally
async fn test_ollama_json_generation() -> anyhow::Result<()> {
    let client = OllamaClient::new("http://localhost:11434", "mistral", Duration::from_secs(300))?;
    let request = GenerateRequest::builder()
        .prompt("Respond with a JSON object with a single key \"moral\" holding one sentence.")
        .build()?;

    let response = client.generate(&request).await?;
    let value: serde_json::Value = serde_json::from_str(response.text())?;
    assert!(value.get("moral").is_some());
    Ok(())
}

#[tokio::test]
#[ignore] // Requires Google credentials
async fn test_google_marked_synthesis() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let client = GoogleTtsClient::from_env(
        "https://texttospeech.googleapis.com/v1beta1/text:synthesize",
        Duration::from_secs(60),
    )?;
    let request = SpeechRequest::builder()
        .input(SpeechInput::Ssml(
            "<speak><mark name=\"word_0\"/>Once <mark name=\"word_1\"/>upon </speak>".to_string(),
        ))
        .voice(VoiceSelection {
            language_code: "en-IN".to_string(),
            name: "en-IN-Standard-A".to_string(),
            gender: VoiceGender::Female,
        })
        .audio(AudioSettings::default())
        .mark_timepoints(true)
        .build()?;

    let speech = client.synthesize(&request).await?;
    assert!(!speech.audio.is_empty());
    assert_eq!(speech.timepoints.len(), 2);
    Ok(())
}
