//! Tests for layered configuration.

use std::io::Write;
use storyteller_config::StorytellerConfig;
use storyteller_core::{AudioEncoding, VoiceGender};

#[test]
fn test_bundled_defaults_match_original_constants() {
    let config = StorytellerConfig::defaults().unwrap();

    assert_eq!(config.ollama.endpoint, "http://localhost:11434");
    assert_eq!(config.ollama.model, "mistral");
    assert_eq!(config.enricher.segment_delay_ms, 500);
    assert_eq!(config.enricher.story_delay_ms, 1000);
    assert!(config.enricher.story_prompt.is_none());

    assert_eq!(config.tts.voice.language_code, "en-IN");
    assert_eq!(config.tts.voice.name, "en-IN-Standard-A");
    assert_eq!(config.tts.voice.gender, VoiceGender::Female);
    assert_eq!(config.tts.audio.encoding, AudioEncoding::Mp3);
    assert_eq!(config.tts.audio.speaking_rate, 0.9);
    assert_eq!(config.tts.audio.pitch, -2.0);

    assert_eq!(config.narrator.story_limit(), Some(5));
    assert_eq!(config.narrator.last_word_pad_secs, 0.2);
    assert_eq!(config.paths.public_audio_prefix, "/audio");
    assert!(config.paths.status_log.is_none());
}

#[test]
fn test_bundled_defaults_ship_with_crate() {
    let bundled = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("storyteller.toml");
    assert!(bundled.is_file());

    let config = StorytellerConfig::from_file(&bundled).unwrap();
    assert_eq!(config, StorytellerConfig::defaults().unwrap());
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let config = StorytellerConfig::from_toml_str(
        r#"
        [ollama]
        model = "llama3"

        [narrator]
        story_limit = 0
        "#,
    )
    .unwrap();

    assert_eq!(config.ollama.model, "llama3");
    assert_eq!(config.ollama.endpoint, "http://localhost:11434");
    assert_eq!(config.narrator.story_limit(), None);
    assert_eq!(config.narrator.last_word_pad_secs, 0.2);
}

#[test]
fn test_from_file_overrides_paths() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[paths]\nstories_json = \"out/stories.json\"\nstatus_log = \"out/status.jsonl\""
    )
    .unwrap();

    let config = StorytellerConfig::from_file(file.path()).unwrap();
    assert_eq!(
        config.paths.stories_json,
        std::path::PathBuf::from("out/stories.json")
    );
    assert_eq!(
        config.paths.status_log.as_deref(),
        Some(std::path::Path::new("out/status.jsonl"))
    );
    assert_eq!(config.paths.audio_dir, std::path::PathBuf::from("public/audio"));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let result = StorytellerConfig::from_file("/nonexistent/storyteller.toml");
    assert!(result.is_err());
}

#[test]
fn test_out_of_range_speaking_rate_rejected() {
    let err = StorytellerConfig::from_toml_str("[tts.audio]\nspeaking_rate = 9.0\n").unwrap_err();
    assert!(err.to_string().contains("speaking_rate"));
}

#[test]
fn test_negative_pad_rejected() {
    let result = StorytellerConfig::from_toml_str("[narrator]\nlast_word_pad_secs = -1.0\n");
    assert!(result.is_err());
}

#[test]
fn test_durations() {
    let config = StorytellerConfig::defaults().unwrap();
    assert_eq!(config.enricher.segment_delay().as_millis(), 500);
    assert_eq!(config.enricher.story_delay().as_secs(), 1);
    assert_eq!(config.narrator.request_delay().as_millis(), 0);
}
