//! Test backend for running surveys without user interaction.
//!
//! `TestBackend` answers each question from a script of raw inputs, so the
//! whole interview loop (traversal, validation, re-prompting) can be
//! exercised in tests.
//!
//! # Example
//!
//! ```rust
//! use questionnaire::{Interview, Question, SurveyDefinition, SurveyStatus, TestBackend};
//!
//! let survey = SurveyDefinition::new(
//!     "demo",
//!     vec![Question::number("age", "How old are you?").required()],
//! );
//! let backend = TestBackend::new().with_answers("age", ["old", "42"]);
//!
//! let mut interview = Interview::new(&survey);
//! let status = interview.run(&backend, |_, _| Ok(())).unwrap();
//!
//! assert_eq!(status, SurveyStatus::Complete);
//! assert_eq!(backend.rejections().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::{Answers, Question, QuestionId, Rejection, SurveyBackend};

/// A test backend that replays pre-configured raw answers.
///
/// Each question id holds a queue of attempts; every time the question is
/// asked the next attempt is consumed. Asked questions and rejections are
/// recorded for assertions.
#[derive(Debug, Default)]
pub struct TestBackend {
    script: RefCell<HashMap<QuestionId, VecDeque<Option<String>>>>,
    asked: RefCell<Vec<QuestionId>>,
    rejections: RefCell<Vec<(QuestionId, Rejection)>>,
}

/// Error type for TestBackend.
#[derive(Debug, thiserror::Error)]
pub enum TestBackendError {
    #[error("No scripted answer left for question: {0}")]
    MissingAnswer(QuestionId),
}

impl TestBackend {
    /// Create a new empty test backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one raw answer for a question.
    pub fn with_answer(self, id: impl Into<QuestionId>, raw: impl Into<String>) -> Self {
        self.push(id.into(), Some(raw.into()));
        self
    }

    /// Queue several attempts for a question, tried in order.
    pub fn with_answers<I, S>(self, id: impl Into<QuestionId>, attempts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        for raw in attempts {
            self.push(id.clone(), Some(raw.into()));
        }
        self
    }

    /// Queue an attempt where the respondent enters nothing at all.
    pub fn with_no_answer(self, id: impl Into<QuestionId>) -> Self {
        self.push(id.into(), None);
        self
    }

    fn push(&self, id: QuestionId, raw: Option<String>) {
        self.script.borrow_mut().entry(id).or_default().push_back(raw);
    }

    /// Question ids in the order they were asked (repeats included).
    pub fn asked(&self) -> Vec<QuestionId> {
        self.asked.borrow().clone()
    }

    /// Every rejection reported so far.
    pub fn rejections(&self) -> Vec<(QuestionId, Rejection)> {
        self.rejections.borrow().clone()
    }
}

impl SurveyBackend for TestBackend {
    type Error = TestBackendError;

    fn ask(&self, question: &Question, _answers: &Answers) -> Result<Option<String>, Self::Error> {
        self.asked.borrow_mut().push(question.id().clone());
        self.script
            .borrow_mut()
            .get_mut(question.id())
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| TestBackendError::MissingAnswer(question.id().clone()))
    }

    fn reject(&self, question: &Question, rejection: &Rejection) -> Result<(), Self::Error> {
        self.rejections
            .borrow_mut()
            .push((question.id().clone(), rejection.clone()));
        Ok(())
    }
}
