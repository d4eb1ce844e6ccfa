//! Stage entry points wired to configuration.
//!
//! Each function loads the story document (except `segment`, which creates
//! it), runs one stage, writes the document back, and appends the run's
//! outcomes to the status log when one is configured. Unit failures are
//! recovered inside the stage; only run-aborting faults are returned.

use storyteller_config::StorytellerConfig;
use storyteller_core::StoryCollection;
use storyteller_error::StorytellerResult;
use storyteller_interface::{SpeechSynthesizer, TextGenerator};
use storyteller_models::{GoogleTtsClient, OllamaClient};
use storyteller_pipeline::{Enricher, Narrator, RunReport, Segmenter};
use storyteller_storage::FileSystemStorage;
use tracing::{info, instrument};

/// Parse the anthology and write a fresh story document.
///
/// # Errors
///
/// `MissingInput` if the source text is absent; document write failures.
#[instrument(skip_all)]
pub async fn segment(config: &StorytellerConfig) -> StorytellerResult<StoryCollection> {
    Segmenter::new()?.run(&config.paths).await
}

/// Enrich the story document using the configured Ollama server.
///
/// # Errors
///
/// See [`enrich_with`].
pub async fn enrich(config: &StorytellerConfig) -> StorytellerResult<RunReport> {
    let client = OllamaClient::new(
        config.ollama.endpoint.clone(),
        config.ollama.model.clone(),
        config.ollama.timeout(),
    )?;
    enrich_with(config, client).await
}

/// Enrich the story document with any text generator.
///
/// # Errors
///
/// `MissingInput` if the document is absent, load errors if it is unreadable
/// or invalid, and document or status-log write failures.
#[instrument(skip_all, fields(provider = generator.provider_name()))]
pub async fn enrich_with<G: TextGenerator>(
    config: &StorytellerConfig,
    generator: G,
) -> StorytellerResult<RunReport> {
    let mut collection = StoryCollection::load(&config.paths.stories_json).await?;
    let enricher = Enricher::from_config(generator, &config.enricher);

    let report = enricher.run(&mut collection).await;
    finish(config, &collection, &report).await?;
    Ok(report)
}

/// Narrate the story document using Google Text-to-Speech.
///
/// Credentials are read from `GOOGLE_TTS_API_KEY` or
/// `GOOGLE_TTS_ACCESS_TOKEN`.
///
/// # Errors
///
/// `ConfigError` if no credentials are set; otherwise see [`narrate_with`].
pub async fn narrate(config: &StorytellerConfig) -> StorytellerResult<RunReport> {
    let client = GoogleTtsClient::from_env(config.tts.endpoint.clone(), config.tts.timeout())?;
    narrate_with(config, client).await
}

/// Narrate the story document with any speech synthesizer, storing audio
/// under `paths.audio_dir`.
///
/// # Errors
///
/// `MissingInput` if the document is absent, load errors if it is unreadable
/// or invalid, storage setup failures, and document or status-log write
/// failures.
#[instrument(skip_all, fields(provider = synthesizer.provider_name()))]
pub async fn narrate_with<S: SpeechSynthesizer>(
    config: &StorytellerConfig,
    synthesizer: S,
) -> StorytellerResult<RunReport> {
    let mut collection = StoryCollection::load(&config.paths.stories_json).await?;
    let storage = FileSystemStorage::new(
        config.paths.audio_dir.clone(),
        config.paths.public_audio_prefix.clone(),
    )?;
    let narrator = Narrator::from_config(synthesizer, storage, &config.tts, &config.narrator);

    let report = narrator.run(&mut collection).await;
    finish(config, &collection, &report).await?;
    Ok(report)
}

/// Segment, enrich and narrate in order.
///
/// # Errors
///
/// The first run-aborting error of any stage.
pub async fn run_all(config: &StorytellerConfig) -> StorytellerResult<RunReport> {
    segment(config).await?;
    let mut report = enrich(config).await?;
    report.extend(narrate(config).await?);
    Ok(report)
}

async fn finish(
    config: &StorytellerConfig,
    collection: &StoryCollection,
    report: &RunReport,
) -> StorytellerResult<()> {
    collection.save(&config.paths.stories_json).await?;

    if let Some(status_log) = &config.paths.status_log {
        report.append_to(status_log).await?;
    }

    info!(
        path = %config.paths.stories_json.display(),
        failed = report.failed_count(),
        "Saved story document"
    );
    Ok(())
}
