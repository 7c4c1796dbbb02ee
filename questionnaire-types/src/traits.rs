use crate::{Answers, Question, Rejection};

/// Trait for backends that put questions in front of a respondent.
///
/// The interview loop decides which question comes next and validates what
/// comes back; a backend only presents and reads. A rejected answer is
/// reported through [`SurveyBackend::reject`] and the same question is asked
/// again.
pub trait SurveyBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Present a question and return the raw answer.
    ///
    /// # Arguments
    /// * `question` - The question to ask
    /// * `answers` - Everything answered so far (for context display)
    ///
    /// # Returns
    /// * `Ok(Some(raw))` with the text as typed
    /// * `Ok(None)` if the respondent entered nothing
    /// * `Err` on cancellation or backend failure
    fn ask(&self, question: &Question, answers: &Answers) -> Result<Option<String>, Self::Error>;

    /// Tell the respondent why their answer to `question` was refused.
    fn reject(&self, question: &Question, rejection: &Rejection) -> Result<(), Self::Error>;

    /// Show the survey's opening message. Does nothing by default.
    fn prelude(&self, _message: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Show the survey's closing message. Does nothing by default.
    fn epilogue(&self, _message: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}
