//! Per-unit run outcomes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use storyteller_error::{
    FailureClass, StorageError, StorageErrorKind, StorytellerError, StorytellerResult,
};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

/// Pipeline stage that produced an outcome.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Text segmentation
    Segment,
    /// Summary, moral and question generation
    Enrich,
    /// Speech synthesis
    Narrate,
}

/// The record a unit of work targeted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitId {
    /// A whole story
    Story {
        /// Story number
        story_number: u32,
    },
    /// One segment
    Segment {
        /// Story number
        story_number: u32,
        /// Segment id
        segment_id: u32,
    },
    /// One guided question of a segment
    Question {
        /// Story number
        story_number: u32,
        /// Segment id
        segment_id: u32,
        /// 0-based question index
        index: usize,
    },
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitId::Story { story_number } => write!(f, "story {}", story_number),
            UnitId::Segment {
                story_number,
                segment_id,
            } => write!(f, "story {} segment {}", story_number, segment_id),
            UnitId::Question {
                story_number,
                segment_id,
                index,
            } => write!(
                f,
                "story {} segment {} question {}",
                story_number, segment_id, index
            ),
        }
    }
}

/// What happened to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UnitStatus {
    /// Backend call succeeded and the record was updated
    Succeeded,
    /// Nothing to do; the record already had its result
    Skipped,
    /// The unit failed and the record kept (or was reset to) its fallback values
    Failed {
        /// Recovery class
        class: FailureClass,
        /// Diagnostic
        message: String,
    },
}

/// One line of the status log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOutcome {
    /// Producing stage
    pub stage: Stage,
    /// Target record
    pub unit: UnitId,
    /// Result
    pub status: UnitStatus,
}

/// Outcomes of every unit processed in a run.
///
/// # Examples
///
/// ```
/// use storyteller_error::{HttpError, StorytellerError};
/// use storyteller_pipeline::{RunReport, Stage, UnitId};
///
/// let mut report = RunReport::new();
/// report.succeeded(Stage::Enrich, UnitId::Story { story_number: 1 });
///
/// let err: StorytellerError = HttpError::new("connection refused").into();
/// report.failed(Stage::Enrich, UnitId::Segment { story_number: 1, segment_id: 2 }, &err);
///
/// assert_eq!(report.succeeded_count(), 1);
/// assert_eq!(report.failed_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    outcomes: Vec<UnitOutcome>,
}

impl RunReport {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome.
    pub fn record(&mut self, stage: Stage, unit: UnitId, status: UnitStatus) {
        self.outcomes.push(UnitOutcome {
            stage,
            unit,
            status,
        });
    }

    /// Record a success.
    pub fn succeeded(&mut self, stage: Stage, unit: UnitId) {
        self.record(stage, unit, UnitStatus::Succeeded);
    }

    /// Record a skip.
    pub fn skipped(&mut self, stage: Stage, unit: UnitId) {
        self.record(stage, unit, UnitStatus::Skipped);
    }

    /// Record a locally recovered failure and emit its diagnostic.
    pub fn failed(&mut self, stage: Stage, unit: UnitId, err: &StorytellerError) {
        let class = FailureClass::classify(err);
        warn!(stage = %stage, unit = %unit, class = %class, error = %err, "Unit failed");
        self.record(
            stage,
            unit,
            UnitStatus::Failed {
                class,
                message: err.to_string(),
            },
        );
    }

    /// All outcomes in processing order.
    pub fn outcomes(&self) -> &[UnitOutcome] {
        &self.outcomes
    }

    /// Outcome recorded for a unit, the latest if there are several.
    pub fn outcome_for(&self, unit: &UnitId) -> Option<&UnitOutcome> {
        self.outcomes.iter().rev().find(|o| &o.unit == unit)
    }

    /// Number of successful units.
    pub fn succeeded_count(&self) -> usize {
        self.count(|s| matches!(s, UnitStatus::Succeeded))
    }

    /// Number of skipped units.
    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, UnitStatus::Skipped))
    }

    /// Number of failed units.
    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, UnitStatus::Failed { .. }))
    }

    /// Number of failed units of one class.
    pub fn failed_with(&self, class: FailureClass) -> usize {
        self.count(|s| matches!(s, UnitStatus::Failed { class: c, .. } if *c == class))
    }

    fn count(&self, pred: impl Fn(&UnitStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }

    /// Append another report's outcomes.
    pub fn extend(&mut self, other: RunReport) {
        self.outcomes.extend(other.outcomes);
    }

    /// Log the counts.
    pub fn log_summary(&self, stage: Stage) {
        info!(
            stage = %stage,
            succeeded = self.succeeded_count(),
            skipped = self.skipped_count(),
            failed = self.failed_count(),
            "Stage finished"
        );
    }

    /// Append every outcome to `path` as one JSON object per line.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be opened or written.
    #[instrument(skip(self), fields(path = %path.display(), outcomes = self.outcomes.len()))]
    pub async fn append_to(&self, path: &Path) -> StorytellerResult<()> {
        let mut lines = String::new();
        for outcome in &self.outcomes {
            let line = serde_json::to_string(outcome).map_err(|e| {
                storyteller_error::JsonError::new(format!("Failed to encode outcome: {}", e))
            })?;
            lines.push_str(&line);
            lines.push('\n');
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;

        file.write_all(lines.as_bytes()).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        file.flush().await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        info!("Appended status log");
        Ok(())
    }
}
