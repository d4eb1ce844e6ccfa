//! End-to-end tests for the stage entry points using mock backends.

use async_trait::async_trait;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use storyteller::{
    GenerateRequest, GenerateResponse, GenerationMetadata, HttpError, PipelineErrorKind,
    SpeechInput, SpeechRequest, SpeechResponse, SpeechSynthesizer, StoryCollection,
    StorytellerConfig, StorytellerErrorKind, StorytellerResult, TextGenerator, Timepoint, stages,
};
use tempfile::TempDir;

const ANTHOLOGY: &str = "\
Story 1: The Lion and the Mouse
--------------------------------
A lion slept under a tree.
A mouse ran across his paw.

Story 2: The Crow
--------------------------------
A thirsty crow found a pitcher.
";

/// Answers every prompt with one object carrying both story and segment fields.
#[derive(Clone, Default)]
struct ScriptedGenerator {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _req: &GenerateRequest) -> StorytellerResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = json!({
            "summary": "A short tale.",
            "moral": "Be kind.",
            "pause_after": true,
            "guided_questions": ["What happened next?"]
        });
        Ok(GenerateResponse::new(
            body.to_string(),
            GenerationMetadata::default(),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Emits one timepoint per mark, or fails every call.
#[derive(Clone, Default)]
struct ScriptedSynthesizer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<SpeechResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(HttpError::new("speech service unreachable").into());
        }
        let marks = match &req.input {
            SpeechInput::Ssml(ssml) if req.mark_timepoints => ssml.matches("<mark name=\"").count(),
            _ => 0,
        };
        Ok(SpeechResponse {
            audio: b"ID3stage-test".to_vec(),
            timepoints: (0..marks)
                .map(|i| Timepoint::new(format!("word_{}", i), i as f64 * 0.4))
                .collect(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

fn config_in(dir: &Path) -> anyhow::Result<StorytellerConfig> {
    let mut config = StorytellerConfig::defaults()?;
    config.paths.source_text = dir.join("book.txt");
    config.paths.stories_json = dir.join("data/stories.json");
    config.paths.audio_dir = dir.join("public/audio");
    config.paths.status_log = Some(dir.join("logs/status.jsonl"));
    config.enricher.segment_delay_ms = 0;
    config.enricher.story_delay_ms = 0;
    config.narrator.request_delay_ms = 0;
    config.narrator.story_limit = 0;
    Ok(config)
}

#[tokio::test]
async fn test_segment_enrich_narrate() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path())?;
    std::fs::write(&config.paths.source_text, ANTHOLOGY)?;

    let collection = stages::segment(&config).await?;
    assert_eq!(collection.len(), 2);

    let generator = ScriptedGenerator::default();
    let report = stages::enrich_with(&config, generator.clone()).await?;
    // One story request plus one per segment
    assert_eq!(generator.calls.load(Ordering::SeqCst), 5);
    assert_eq!(report.failed_count(), 0);

    let synthesizer = ScriptedSynthesizer::default();
    let report = stages::narrate_with(&config, synthesizer.clone()).await?;
    // Three segments and three questions
    assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 6);
    assert_eq!(report.failed_count(), 0);

    let saved = StoryCollection::load(&config.paths.stories_json).await?;
    let first = &saved.stories()[0];
    assert_eq!(first.summary, "A short tale.");
    assert_eq!(
        first.segments[0].audio_path.as_deref(),
        Some("/audio/story_1/segment_1.mp3")
    );
    assert_eq!(first.segments[0].timestamps.len(), 6);
    assert!(dir.path().join("public/audio/story_1/segment_1.mp3").exists());

    let status = std::fs::read_to_string(dir.path().join("logs/status.jsonl"))?;
    assert_eq!(status.lines().count(), report.outcomes().len() + 5);
    for line in status.lines() {
        let _: serde_json::Value = serde_json::from_str(line)?;
    }
    Ok(())
}

#[tokio::test]
async fn test_second_narration_is_skipped() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path())?;
    std::fs::write(&config.paths.source_text, ANTHOLOGY)?;
    stages::segment(&config).await?;

    stages::narrate_with(&config, ScriptedSynthesizer::default()).await?;
    let synthesizer = ScriptedSynthesizer::default();
    let report = stages::narrate_with(&config, synthesizer.clone()).await?;

    assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.skipped_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_story_limit_applies() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut config = config_in(dir.path())?;
    config.narrator.story_limit = 1;
    std::fs::write(&config.paths.source_text, ANTHOLOGY)?;
    stages::segment(&config).await?;

    let synthesizer = ScriptedSynthesizer::default();
    stages::narrate_with(&config, synthesizer.clone()).await?;

    assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 2);
    let saved = StoryCollection::load(&config.paths.stories_json).await?;
    assert!(saved.stories()[1].segments[0].audio_path.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_synthesizer_still_saves() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path())?;
    std::fs::write(&config.paths.source_text, ANTHOLOGY)?;
    stages::segment(&config).await?;

    let synthesizer = ScriptedSynthesizer {
        fail: true,
        ..Default::default()
    };
    let report = stages::narrate_with(&config, synthesizer).await?;

    assert_eq!(report.failed_count(), 3);
    let saved = StoryCollection::load(&config.paths.stories_json).await?;
    assert!(saved.stories()[0].segments[0].audio_path.is_none());
    assert!(saved.stories()[0].segments[0].timestamps.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_enrich_without_document_is_missing_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path())?;

    let err = stages::enrich_with(&config, ScriptedGenerator::default())
        .await
        .unwrap_err();

    match err.kind() {
        StorytellerErrorKind::Pipeline(e) => {
            assert!(matches!(e.kind, PipelineErrorKind::MissingInput(_)))
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!config.paths.stories_json.exists());
    Ok(())
}

#[tokio::test]
async fn test_segment_without_source_is_missing_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path())?;

    let err = stages::segment(&config).await.unwrap_err();

    assert!(matches!(err.kind(), StorytellerErrorKind::Pipeline(_)));
    Ok(())
}
