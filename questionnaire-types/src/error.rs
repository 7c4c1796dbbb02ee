use crate::QuestionId;

/// Error type for survey operations.
///
/// Rejected answers are not errors; they are returned as ordinary
/// validation outcomes so the caller can re-prompt.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// User cancelled the survey (Ctrl+C, closed window, etc.)
    #[error("Survey cancelled by user")]
    Cancelled,

    /// Backend-specific failure (I/O, terminal, persistence hook, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),

    /// The survey definition is structurally unusable.
    #[error("Invalid survey definition: {0}")]
    InvalidDefinition(String),

    /// The survey JSON could not be parsed.
    #[error("Survey parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The survey file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An answer was submitted for a question the survey does not have.
    #[error("Question not found: {0}")]
    UnknownQuestion(QuestionId),

    /// An answer was submitted for a question that already has one.
    #[error("Question already answered: {0}")]
    AlreadyAnswered(QuestionId),
}

impl SurveyError {
    /// Create a backend error from any error type.
    ///
    /// A `SurveyError` that was boxed into an `anyhow::Error` along the way is
    /// unwrapped rather than nested.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        match err.into().downcast::<SurveyError>() {
            Ok(inner) => inner,
            Err(other) => Self::Backend(other),
        }
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
