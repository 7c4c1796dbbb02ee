//! Submitting answers and driving a backend through a survey.

use tracing::debug;

use crate::traversal::{self, Progress, SurveyStatus};
use crate::validation::{ValidationOutcome, validate};
use crate::{
    AnswerValue, Answers, Question, QuestionId, Rejection, SurveyBackend, SurveyDefinition,
    SurveyError,
};

/// What happened to a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The normalized answer was stored; `status` reflects the answers after storing it.
    Recorded {
        value: AnswerValue,
        status: SurveyStatus,
    },

    /// The answer was refused and nothing was stored.
    Rejected(Rejection),
}

/// Look up the question and validate `raw` for it without storing anything.
///
/// # Errors
/// * `UnknownQuestion` if the survey has no question with that id
/// * `AlreadyAnswered` if `answers` already holds an answer for it
pub fn check_answer<'s>(
    survey: &'s SurveyDefinition,
    answers: &Answers,
    question_id: &QuestionId,
    raw: Option<&str>,
) -> Result<(&'s Question, ValidationOutcome), SurveyError> {
    let question = survey
        .question(question_id)
        .ok_or_else(|| SurveyError::UnknownQuestion(question_id.clone()))?;

    if answers.contains(question_id) {
        return Err(SurveyError::AlreadyAnswered(question_id.clone()));
    }

    let outcome = validate(question, raw);
    if let ValidationOutcome::Rejected(rejection) = &outcome {
        debug!(
            survey_id = %survey.survey_id,
            question_id = %question_id,
            kind = ?rejection.kind,
            "answer rejected"
        );
    }
    Ok((question, outcome))
}

/// Validate `raw` and, if accepted, store the normalized answer.
///
/// Existing answers are never replaced. Answering a question that is
/// currently ineligible is allowed.
pub fn submit_answer(
    survey: &SurveyDefinition,
    answers: &mut Answers,
    question_id: &QuestionId,
    raw: Option<&str>,
) -> Result<Submission, SurveyError> {
    match check_answer(survey, answers, question_id, raw)?.1 {
        ValidationOutcome::Rejected(rejection) => Ok(Submission::Rejected(rejection)),
        ValidationOutcome::Accepted(value) => {
            answers.insert(question_id.clone(), value.clone());
            Ok(Submission::Recorded {
                value,
                status: SurveyStatus::of(survey, answers),
            })
        }
    }
}

/// One respondent's pass through a survey.
///
/// Owns the answers collected so far and borrows the (read-only) definition.
#[derive(Debug, Clone)]
pub struct Interview<'a> {
    definition: &'a SurveyDefinition,
    answers: Answers,
}

impl<'a> Interview<'a> {
    /// Start with no answers.
    pub fn new(definition: &'a SurveyDefinition) -> Self {
        Self::resume(definition, Answers::new())
    }

    /// Continue from previously collected answers.
    pub fn resume(definition: &'a SurveyDefinition, answers: Answers) -> Self {
        Self {
            definition,
            answers,
        }
    }

    pub fn definition(&self) -> &'a SurveyDefinition {
        self.definition
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn into_answers(self) -> Answers {
        self.answers
    }

    /// The next question to ask, if any.
    pub fn next_question(&self) -> Option<&'a Question> {
        traversal::next_question(self.definition, &self.answers)
    }

    pub fn status(&self) -> SurveyStatus {
        SurveyStatus::of(self.definition, &self.answers)
    }

    pub fn progress(&self) -> Progress {
        traversal::progress(self.definition, &self.answers)
    }

    /// Submit a raw answer for `question_id`. See [`submit_answer`].
    pub fn submit(
        &mut self,
        question_id: &QuestionId,
        raw: Option<&str>,
    ) -> Result<Submission, SurveyError> {
        submit_answer(self.definition, &mut self.answers, question_id, raw)
    }

    /// Ask questions through `backend` until none is pending.
    ///
    /// Rejected answers are reported back to the backend and the question is
    /// asked again. Every accepted answer is handed to `on_record` before it is
    /// stored; if `on_record` fails the answer is not kept and the run stops.
    pub fn run<B, F>(&mut self, backend: &B, mut on_record: F) -> Result<SurveyStatus, SurveyError>
    where
        B: SurveyBackend,
        F: FnMut(&Question, &AnswerValue) -> anyhow::Result<()>,
    {
        if let Some(prelude) = &self.definition.prelude {
            backend.prelude(prelude).map_err(SurveyError::backend)?;
        }

        while let Some(question) = self.next_question() {
            let raw = backend
                .ask(question, &self.answers)
                .map_err(SurveyError::backend)?;

            match check_answer(self.definition, &self.answers, question.id(), raw.as_deref())?.1 {
                ValidationOutcome::Rejected(rejection) => {
                    backend
                        .reject(question, &rejection)
                        .map_err(SurveyError::backend)?;
                }
                ValidationOutcome::Accepted(value) => {
                    on_record(question, &value).map_err(SurveyError::backend)?;
                    self.answers.insert(question.id().clone(), value);
                }
            }
        }

        if let Some(epilogue) = &self.definition.epilogue {
            backend.epilogue(epilogue).map_err(SurveyError::backend)?;
        }

        Ok(self.status())
    }
}
