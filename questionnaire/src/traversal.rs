//! Choosing the next question and deciding completion.
//!
//! Both operations are pure functions of the survey and the answers: they
//! keep no state between calls and give the same result for the same input.

use crate::eligibility::is_eligible;
use crate::{Answers, Question, SurveyDefinition};

/// Check if `question` still has to be asked: eligible and not yet answered.
pub fn is_pending(question: &Question, answers: &Answers) -> bool {
    !answers.contains(question.id()) && is_eligible(question, answers)
}

/// Pending questions in declared order.
pub fn pending_questions<'s>(
    survey: &'s SurveyDefinition,
    answers: &Answers,
) -> impl Iterator<Item = &'s Question> {
    survey
        .questions()
        .iter()
        .filter(move |question| is_pending(question, answers))
}

/// The first pending question in declared order, or `None` when every
/// question is answered or currently ineligible.
pub fn next_question<'s>(survey: &'s SurveyDefinition, answers: &Answers) -> Option<&'s Question> {
    survey
        .questions()
        .iter()
        .find(|question| is_pending(question, answers))
}

/// Check if no eligible, required question is left unanswered.
///
/// Optional questions and ineligible questions never block completion, so a
/// survey without questions is complete from the start.
pub fn is_complete(survey: &SurveyDefinition, answers: &Answers) -> bool {
    !survey
        .questions()
        .iter()
        .any(|question| question.is_required() && is_pending(question, answers))
}

/// Where a session stands. There is no way back from `Complete` since answers
/// are only ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyStatus {
    InProgress,
    Complete,
}

impl SurveyStatus {
    /// Evaluate the status for the given answers.
    pub fn of(survey: &SurveyDefinition, answers: &Answers) -> Self {
        if is_complete(survey, answers) {
            Self::Complete
        } else {
            Self::InProgress
        }
    }

    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}

/// Answered and still-pending question counts, for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub answered: usize,
    pub remaining: usize,
}

/// Count answered questions of this survey and those currently pending.
///
/// `remaining` can grow as answers unlock conditional questions.
pub fn progress(survey: &SurveyDefinition, answers: &Answers) -> Progress {
    let answered = survey
        .questions()
        .iter()
        .filter(|q| answers.contains(q.id()))
        .count();
    Progress {
        answered,
        remaining: pending_questions(survey, answers).count(),
    }
}
