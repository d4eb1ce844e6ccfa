//! Splits the plain-text anthology into story and segment records.

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use storyteller_config::PathsConfig;
use storyteller_core::{Segment, Story, StoryCollection};
use storyteller_error::{BuilderError, PipelineError, PipelineErrorKind, StorytellerResult};
use tracing::{debug, info, instrument, warn};

/// Length of the provisional summary, in characters.
pub const SUMMARY_CHARS: usize = 200;

/// Moral recorded until the enricher replaces it.
pub const MORAL_PLACEHOLDER: &str = "Moral to be generated later.";

/// A `Story ...` line, possibly indented, directly followed by a line of ten
/// or more dashes.
const BOUNDARY_PATTERN: &str = r"(?m)^[ \t]*(Story\b[^\n]*)\n-{10,}[ \t]*$";

/// `Story <number> : <title>`
const HEADER_PATTERN: &str = r"^Story\s+(\S+?)\s*:\s*(.*)$";

/// Parses anthology text of the form
///
/// ```text
/// Story 1 : The Monkey and the Wedge
/// ----------------------------------
/// First paragraph.
///
/// Second paragraph.
/// ```
///
/// into stories with one segment per non-blank line.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::Segmenter;
///
/// let text = "Story 1 : The Lion\n----------\nA lion slept.\n\nA mouse ran by.\n";
/// let stories = Segmenter::new().unwrap().segment(text);
///
/// assert_eq!(stories.len(), 1);
/// assert_eq!(stories[0].title, "The Lion");
/// assert_eq!(stories[0].segments.len(), 2);
/// assert_eq!(stories[0].segments[1].segment_text, "A mouse ran by.");
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    boundary: Regex,
    header: Regex,
}

impl Segmenter {
    /// Create a segmenter.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError` if a boundary pattern fails to compile.
    pub fn new() -> StorytellerResult<Self> {
        Ok(Self {
            boundary: compile(BOUNDARY_PATTERN)?,
            header: compile(HEADER_PATTERN)?,
        })
    }

    /// Parse anthology text into stories, in document order.
    ///
    /// Blocks whose header does not read `Story <positive number> : <title>`
    /// are logged and dropped along with their body, as are repeats of a
    /// number already seen. Text before the first header is ignored.
    pub fn segment(&self, text: &str) -> Vec<Story> {
        let text = text.replace("\r\n", "\n");

        let headers: Vec<_> = self
            .boundary
            .captures_iter(&text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let line = caps.get(1)?;
                Some((line.as_str(), whole.end()))
            })
            .collect();

        let body_ends = self
            .boundary
            .find_iter(&text)
            .skip(1)
            .map(|m| m.start())
            .chain(std::iter::once(text.len()));

        let mut seen = HashSet::new();
        let mut stories = Vec::with_capacity(headers.len());

        for ((header, body_start), body_end) in headers.into_iter().zip(body_ends) {
            let Some((story_number, title)) = self.parse_header(header) else {
                continue;
            };

            if !seen.insert(story_number) {
                warn!(story_number, title = %title, "Duplicate story number, dropping block");
                continue;
            }

            let story = build_story(story_number, title, &text[body_start..body_end]);
            debug!(
                story_number,
                segments = story.segments.len(),
                "Segmented story"
            );
            stories.push(story);
        }

        stories
    }

    fn parse_header(&self, line: &str) -> Option<(u32, String)> {
        let line = line.trim();
        let Some(caps) = self.header.captures(line) else {
            warn!(header = %line, "Unparseable story header, dropping block");
            return None;
        };

        let number = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        match number.parse::<u32>() {
            Ok(n) if n > 0 => {
                let title = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
                Some((n, title.to_string()))
            }
            _ => {
                warn!(header = %line, number = %number, "Invalid story number, dropping block");
                None
            }
        }
    }

    /// Read the anthology, segment it, and write the story document.
    ///
    /// An existing document at `paths.stories_json` is overwritten.
    ///
    /// # Errors
    ///
    /// `MissingInput` if the source file does not exist, `InputRead` if it
    /// cannot be read, `DocumentWrite` if the document cannot be written.
    #[instrument(skip(self, paths), fields(source = %paths.source_text.display()))]
    pub async fn run(&self, paths: &PathsConfig) -> StorytellerResult<StoryCollection> {
        let text = read_source(&paths.source_text).await?;
        let collection = StoryCollection::new(self.segment(&text));

        info!(
            stories = collection.len(),
            segments = collection
                .stories()
                .iter()
                .map(|s| s.segments.len())
                .sum::<usize>(),
            "Segmented anthology"
        );

        collection.save(&paths.stories_json).await?;
        Ok(collection)
    }
}

fn compile(pattern: &str) -> StorytellerResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| BuilderError::new(format!("Invalid pattern {}: {}", pattern, e)).into())
}

fn build_story(story_number: u32, title: String, body: &str) -> Story {
    let full_text = body.trim().to_string();

    let segments = full_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .zip(1u32..)
        .map(|(line, id)| Segment::new(id, line))
        .collect();

    Story {
        story_number,
        title,
        summary: provisional_summary(&full_text),
        moral: MORAL_PLACEHOLDER.to_string(),
        full_text,
        segments,
    }
}

fn provisional_summary(full_text: &str) -> String {
    match full_text.char_indices().nth(SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &full_text[..cut]),
        None => full_text.to_string(),
    }
}

async fn read_source(path: &Path) -> StorytellerResult<String> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::error!(path = %path.display(), "Source text not found");
        return Err(
            PipelineError::new(PipelineErrorKind::MissingInput(path.display().to_string())).into(),
        );
    }

    tokio::fs::read_to_string(path).await.map_err(|e| {
        PipelineError::new(PipelineErrorKind::InputRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()
    })
}
