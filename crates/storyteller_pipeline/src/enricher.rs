//! Backfills summaries, morals, pause points and guided questions.

use crate::{
    DEFAULT_SEGMENT_PROMPT, DEFAULT_STORY_PROMPT, Pacer, PromptTemplate, RunReport,
    SegmentInsight, Stage, StoryInsight, UnitId, parse_json,
};
use storyteller_config::EnricherConfig;
use storyteller_core::{GenerateRequest, ResponseFormat, Segment, Story, StoryCollection};
use storyteller_error::{BuilderError, StorytellerResult};
use storyteller_interface::TextGenerator;
use tracing::{debug, info, instrument};

/// Enrichment stage.
///
/// For every story one request asks for `{summary, moral}`; then, segment by
/// segment, one request asks for `{pause_after, guided_questions}`. A
/// successful response replaces only the keys it contains. A failed request
/// or unparseable response leaves the record as it was; the failure is
/// logged, recorded in the report, and the run moves on. There is no retry.
#[derive(Debug, Clone)]
pub struct Enricher<G> {
    generator: G,
    story_prompt: PromptTemplate,
    segment_prompt: PromptTemplate,
    segment_pacer: Pacer,
    story_pacer: Pacer,
}

impl<G: TextGenerator> Enricher<G> {
    /// Create an enricher with the default prompts and no pacing.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            story_prompt: PromptTemplate::new(DEFAULT_STORY_PROMPT),
            segment_prompt: PromptTemplate::new(DEFAULT_SEGMENT_PROMPT),
            segment_pacer: Pacer::none(),
            story_pacer: Pacer::none(),
        }
    }

    /// Create an enricher using configured prompts and delays.
    pub fn from_config(generator: G, config: &EnricherConfig) -> Self {
        let mut enricher = Self::new(generator)
            .with_pacing(Pacer::new(config.segment_delay()), Pacer::new(config.story_delay()));
        if let Some(template) = &config.story_prompt {
            enricher.story_prompt = PromptTemplate::new(template.clone());
        }
        if let Some(template) = &config.segment_prompt {
            enricher.segment_prompt = PromptTemplate::new(template.clone());
        }
        enricher
    }

    /// Replace the pacing between segment requests and between stories.
    pub fn with_pacing(mut self, segment: Pacer, story: Pacer) -> Self {
        self.segment_pacer = segment;
        self.story_pacer = story;
        self
    }

    /// Replace the prompt templates.
    pub fn with_prompts(mut self, story: PromptTemplate, segment: PromptTemplate) -> Self {
        self.story_prompt = story;
        self.segment_prompt = segment;
        self
    }

    /// The generator in use.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Enrich every story in collection order, with the story delay between
    /// consecutive stories.
    #[instrument(skip_all, fields(stories = collection.len(), model = %self.generator.model_name()))]
    pub async fn run(&self, collection: &mut StoryCollection) -> RunReport {
        let mut report = RunReport::new();

        for (index, story) in collection.stories_mut().iter_mut().enumerate() {
            if index > 0 {
                self.story_pacer.pause().await;
            }
            self.enrich_story(story, &mut report).await;
        }

        report.log_summary(Stage::Enrich);
        report
    }

    /// Story-level request, then one request per segment in id order, with the
    /// segment delay between consecutive segment requests.
    #[instrument(skip_all, fields(story_number = story.story_number))]
    pub async fn enrich_story(&self, story: &mut Story, report: &mut RunReport) {
        info!(title = %story.title, "Enriching story");
        let unit = UnitId::Story {
            story_number: story.story_number,
        };

        let prompt = self.story_prompt.render(&[
            ("title", story.title.as_str()),
            ("full_text", story.full_text.as_str()),
        ]);
        match self.ask::<StoryInsight>(prompt).await {
            Ok(insight) => {
                insight.apply(story);
                report.succeeded(Stage::Enrich, unit);
            }
            Err(e) => report.failed(Stage::Enrich, unit, &e),
        }

        let story_number = story.story_number;
        let title = story.title.clone();
        for (index, segment) in story.segments.iter_mut().enumerate() {
            if index > 0 {
                self.segment_pacer.pause().await;
            }
            self.enrich_segment(story_number, &title, segment, report)
                .await;
        }
    }

    #[instrument(skip_all, fields(segment_id = segment.segment_id))]
    async fn enrich_segment(
        &self,
        story_number: u32,
        title: &str,
        segment: &mut Segment,
        report: &mut RunReport,
    ) {
        let unit = UnitId::Segment {
            story_number,
            segment_id: segment.segment_id,
        };

        let prompt = self.segment_prompt.render(&[
            ("title", title),
            ("segment_text", segment.segment_text.as_str()),
        ]);
        match self.ask::<SegmentInsight>(prompt).await {
            Ok(insight) => {
                insight.apply(segment);
                debug!(
                    pause_after = segment.pause_after,
                    questions = segment.guided_questions.len(),
                    "Enriched segment"
                );
                report.succeeded(Stage::Enrich, unit);
            }
            Err(e) => report.failed(Stage::Enrich, unit, &e),
        }
    }

    async fn ask<T>(&self, prompt: String) -> StorytellerResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = GenerateRequest::builder()
            .model(Some(self.generator.model_name().to_string()))
            .prompt(prompt)
            .format(ResponseFormat::Json)
            .build()
            .map_err(|e| BuilderError::new(format!("Generate request: {}", e)))?;

        let response = self.generator.generate(&request).await?;
        parse_json(response.text())
    }
}
