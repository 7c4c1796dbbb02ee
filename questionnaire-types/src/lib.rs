//! Core types for the questionnaire crate.
//!
//! This crate provides the foundational types for defining surveys:
//! - `SurveyDefinition` - The top-level survey structure, loaded from JSON
//! - `Question` and `QuestionKind` - Individual questions and their types
//! - `Condition` - `show_if` skip-logic preconditions
//! - `Answers` and `AnswerValue` - Normalized answers keyed by `QuestionId`
//! - `SurveyBackend` - For implementing interactive front-ends

mod question_id;
pub use question_id::QuestionId;

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::Answers;

mod condition;
pub use condition::{Condition, Constraint};

mod question;
pub use question::{ChoiceQuestion, Question, QuestionKind};

mod survey_definition;
pub use survey_definition::SurveyDefinition;

mod rejection;
pub use rejection::{Rejection, RejectionKind};

mod error;
pub use error::SurveyError;

mod traits;
pub use traits::SurveyBackend;
