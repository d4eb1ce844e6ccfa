//! Pipeline stage error types.

/// Specific error conditions raised by the segment, enrich and narrate stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Input file does not exist
    #[display("Input file not found: {}", _0)]
    MissingInput(String),
    /// Input file exists but could not be read
    #[display("Failed to read input: {}", _0)]
    InputRead(String),
    /// Backend succeeded but its payload is not the expected JSON shape
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// Story document violates a record invariant
    #[display("Invalid story document: {}", _0)]
    InvalidDocument(String),
    /// Story document could not be written
    #[display("Failed to write story document: {}", _0)]
    DocumentWrite(String),
    /// Speech backend returned timepoints that cannot be aligned to words
    #[display("Malformed timepoints: {}", _0)]
    MalformedTimepoints(String),
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use storyteller_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::MissingInput("stories.txt".into()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
