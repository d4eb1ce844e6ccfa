//! Synthesizes narration audio and per-word timing.

use crate::{Pacer, RunReport, Stage, UnitId, align_word_timings, marked_ssml, plain_ssml};
use storyteller_config::{NarratorConfig, TtsConfig};
use storyteller_core::{
    AudioSettings, Segment, SpeechInput, SpeechRequest, SpeechResponse, Story, StoryCollection,
    StructuredQuestion, VoiceSelection, WordTiming,
};
use storyteller_error::{BuilderError, PipelineError, PipelineErrorKind, StorytellerResult};
use storyteller_interface::SpeechSynthesizer;
use storyteller_storage::{AudioKey, AudioStorage};
use tracing::{debug, info, instrument};

/// Default duration given to the last word of a segment, in seconds.
const DEFAULT_LAST_WORD_PAD: f64 = 0.2;

/// Narration stage.
///
/// Each segment is sent as SSML with a mark before every word; the returned
/// audio is stored under `story_<n>/segment_<id>` and the mark timepoints
/// become the segment's word timings. Each guided question is first upgraded
/// to the structured shape, then narrated without marks under
/// `story_<n>/segment_<id>_questions/question_<i>`.
///
/// Re-runs are idempotent: a segment whose artifact exists and that already
/// has timings is skipped without a backend call, as is a question whose
/// artifact exists. A failed segment is reset to "no audio, no timings"; a
/// failed question loses its audio path.
#[derive(Debug, Clone)]
pub struct Narrator<S, A> {
    synthesizer: S,
    storage: A,
    voice: VoiceSelection,
    audio: AudioSettings,
    story_limit: Option<usize>,
    last_word_pad: f64,
    pacer: Pacer,
}

impl<S: SpeechSynthesizer, A: AudioStorage> Narrator<S, A> {
    /// Create a narrator for every story, with the default last-word pad and
    /// no pacing.
    pub fn new(synthesizer: S, storage: A, voice: VoiceSelection, audio: AudioSettings) -> Self {
        Self {
            synthesizer,
            storage,
            voice,
            audio,
            story_limit: None,
            last_word_pad: DEFAULT_LAST_WORD_PAD,
            pacer: Pacer::none(),
        }
    }

    /// Create a narrator from the speech and narration settings.
    pub fn from_config(
        synthesizer: S,
        storage: A,
        tts: &TtsConfig,
        narrator: &NarratorConfig,
    ) -> Self {
        Self::new(synthesizer, storage, tts.voice.clone(), tts.audio.clone())
            .with_story_limit(narrator.story_limit())
            .with_last_word_pad(narrator.last_word_pad_secs)
            .with_pacing(Pacer::new(narrator.request_delay()))
    }

    /// Narrate only the first `limit` stories; `None` narrates all.
    pub fn with_story_limit(mut self, limit: Option<usize>) -> Self {
        self.story_limit = limit;
        self
    }

    /// Duration assigned to the last word of each segment.
    pub fn with_last_word_pad(mut self, seconds: f64) -> Self {
        self.last_word_pad = seconds;
        self
    }

    /// Pause after every synthesis request.
    pub fn with_pacing(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Story limit in effect.
    pub fn story_limit(&self) -> Option<usize> {
        self.story_limit
    }

    /// Artifact storage.
    pub fn storage(&self) -> &A {
        &self.storage
    }

    /// Narrate the leading stories of the collection.
    #[instrument(skip_all, fields(stories = collection.len(), limit = ?self.story_limit))]
    pub async fn run(&self, collection: &mut StoryCollection) -> RunReport {
        let mut report = RunReport::new();
        let limit = self.story_limit.unwrap_or(usize::MAX);

        for story in collection.stories_mut().iter_mut().take(limit) {
            self.narrate_story(story, &mut report).await;
        }

        report.log_summary(Stage::Narrate);
        report
    }

    /// Narrate every segment of one story, with its questions.
    #[instrument(skip_all, fields(story_number = story.story_number))]
    pub async fn narrate_story(&self, story: &mut Story, report: &mut RunReport) {
        info!(title = %story.title, segments = story.segments.len(), "Narrating story");
        let story_number = story.story_number;

        for segment in &mut story.segments {
            segment.normalize_questions();
            self.narrate_segment(story_number, segment, report).await;

            let segment_id = segment.segment_id;
            for (index, question) in segment.guided_questions.iter_mut().enumerate() {
                if let Some(question) = question.as_structured_mut() {
                    self.narrate_question(story_number, segment_id, index, question, report)
                        .await;
                }
            }
        }
    }

    fn key(&self, key: AudioKey) -> AudioKey {
        key.with_extension(self.audio.encoding.extension())
    }

    #[instrument(skip_all, fields(segment_id = segment.segment_id))]
    async fn narrate_segment(
        &self,
        story_number: u32,
        segment: &mut Segment,
        report: &mut RunReport,
    ) {
        let unit = UnitId::Segment {
            story_number,
            segment_id: segment.segment_id,
        };
        let key = self.key(AudioKey::segment(story_number, segment.segment_id));

        let exists = self.storage.exists(&key).await.unwrap_or(false);
        if exists && !segment.timestamps.is_empty() {
            debug!(key = %key, "Audio already exists, skipping");
            report.skipped(Stage::Narrate, unit);
            return;
        }

        let words = segment.words();
        if words.is_empty() {
            debug!("Segment has no words, skipping");
            report.skipped(Stage::Narrate, unit);
            return;
        }

        let result = self.synthesize_segment(&key, &words).await;
        self.pacer.pause().await;

        match result {
            Ok((audio_path, timestamps)) => {
                debug!(audio_path = %audio_path, words = timestamps.len(), "Narrated segment");
                segment.audio_path = Some(audio_path);
                segment.timestamps = timestamps;
                report.succeeded(Stage::Narrate, unit);
            }
            Err(e) => {
                segment.clear_audio();
                report.failed(Stage::Narrate, unit, &e);
            }
        }
    }

    async fn synthesize_segment(
        &self,
        key: &AudioKey,
        words: &[&str],
    ) -> StorytellerResult<(String, Vec<WordTiming>)> {
        let request = self.request(SpeechInput::Ssml(marked_ssml(words)), true)?;
        let speech = self.synthesize(&request).await?;

        let timestamps = align_word_timings(words, &speech.timepoints, self.last_word_pad)?;
        let audio_path = self.storage.store(key, &speech.audio).await?;
        Ok((audio_path, timestamps))
    }

    #[instrument(skip_all, fields(segment_id = segment_id, question_index = index))]
    async fn narrate_question(
        &self,
        story_number: u32,
        segment_id: u32,
        index: usize,
        question: &mut StructuredQuestion,
        report: &mut RunReport,
    ) {
        let unit = UnitId::Question {
            story_number,
            segment_id,
            index,
        };
        let key = self.key(AudioKey::question(story_number, segment_id, index));
        question.timestamps.clear();

        if self.storage.exists(&key).await.unwrap_or(false) {
            debug!(key = %key, "Question audio already exists, skipping");
            question.audio_path = Some(self.storage.public_path(&key));
            report.skipped(Stage::Narrate, unit);
            return;
        }

        let result = self.synthesize_question(&key, &question.text).await;
        self.pacer.pause().await;

        match result {
            Ok(audio_path) => {
                question.audio_path = Some(audio_path);
                report.succeeded(Stage::Narrate, unit);
            }
            Err(e) => {
                question.audio_path = None;
                report.failed(Stage::Narrate, unit, &e);
            }
        }
    }

    async fn synthesize_question(&self, key: &AudioKey, text: &str) -> StorytellerResult<String> {
        let request = self.request(SpeechInput::Ssml(plain_ssml(text)), false)?;
        let speech = self.synthesize(&request).await?;
        self.storage.store(key, &speech.audio).await
    }

    fn request(
        &self,
        input: SpeechInput,
        mark_timepoints: bool,
    ) -> StorytellerResult<SpeechRequest> {
        SpeechRequest::builder()
            .input(input)
            .voice(self.voice.clone())
            .audio(self.audio.clone())
            .mark_timepoints(mark_timepoints)
            .build()
            .map_err(|e| BuilderError::new(format!("Speech request: {}", e)).into())
    }

    async fn synthesize(&self, request: &SpeechRequest) -> StorytellerResult<SpeechResponse> {
        let speech = self.synthesizer.synthesize(request).await?;
        if speech.audio.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::MalformedResponse(
                "speech backend returned no audio".to_string(),
            ))
            .into());
        }
        Ok(speech)
    }
}
