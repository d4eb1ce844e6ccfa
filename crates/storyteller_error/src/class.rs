//! Coarse failure classification for per-unit recovery and reporting.

use crate::{PipelineErrorKind, StorytellerError, StorytellerErrorKind};
use serde::{Deserialize, Serialize};

/// How a failed unit of work failed.
///
/// `Transport` and `Malformed` are recovered locally by the stages; the unit
/// keeps its prior values and the run continues. `MissingInput` aborts a run.
///
/// # Examples
///
/// ```
/// use storyteller_error::{FailureClass, HttpError, StorytellerError};
///
/// let err: StorytellerError = HttpError::new("connection reset").into();
/// assert_eq!(FailureClass::classify(&err), FailureClass::Transport);
/// assert_eq!(FailureClass::Transport.to_string(), "transport");
/// ```
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
pub enum FailureClass {
    /// Backend unreachable or answered with a non-success status
    Transport,
    /// Backend answered but the payload did not have the expected shape
    Malformed,
    /// Source file absent
    MissingInput,
    /// Storage, configuration and other local faults
    Other,
}

impl FailureClass {
    /// Classify an error into one of the recovery classes.
    pub fn classify(err: &StorytellerError) -> Self {
        match err.kind() {
            StorytellerErrorKind::Http(_) | StorytellerErrorKind::Backend(_) => Self::Transport,
            StorytellerErrorKind::Json(_) => Self::Malformed,
            StorytellerErrorKind::Pipeline(e) => match e.kind {
                PipelineErrorKind::MalformedResponse(_)
                | PipelineErrorKind::MalformedTimepoints(_) => Self::Malformed,
                PipelineErrorKind::MissingInput(_) => Self::MissingInput,
                _ => Self::Other,
            },
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendError, PipelineError, StorageError, StorageErrorKind};

    #[test]
    fn test_backend_status_is_transport() {
        let err: StorytellerError = BackendError::with_status(503, "overloaded").into();
        assert_eq!(FailureClass::classify(&err), FailureClass::Transport);
    }

    #[test]
    fn test_malformed_response_is_malformed() {
        let err: StorytellerError =
            PipelineError::new(PipelineErrorKind::MalformedResponse("not json".into())).into();
        assert_eq!(FailureClass::classify(&err), FailureClass::Malformed);
    }

    #[test]
    fn test_missing_input() {
        let err: StorytellerError =
            PipelineError::new(PipelineErrorKind::MissingInput("book.txt".into())).into();
        assert_eq!(FailureClass::classify(&err), FailureClass::MissingInput);
    }

    #[test]
    fn test_storage_is_other() {
        let err: StorytellerError =
            StorageError::new(StorageErrorKind::FileWrite("disk full".into())).into();
        assert_eq!(FailureClass::classify(&err), FailureClass::Other);
    }
}
