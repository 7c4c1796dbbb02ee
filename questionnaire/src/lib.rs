//! # questionnaire
//!
//! Drive a linear, conditionally-branching questionnaire.
//!
//! Given a [`SurveyDefinition`] and the [`Answers`] collected so far, this
//! crate decides which question to ask next, validates and normalizes each
//! incoming raw answer, and decides when the survey is complete. Everything
//! here is pure and synchronous; sessions, persistence and transport live in
//! the caller.
//!
//! ## Usage
//!
//! ```rust
//! use questionnaire::{Answers, Question, SurveyDefinition, is_complete, next_question, validate};
//!
//! let survey = SurveyDefinition::new(
//!     "job_satisfaction",
//!     vec![
//!         Question::choice("q1", "Do you enjoy your job?", ["Yes", "No"]).required(),
//!         Question::text("q2", "What do you enjoy most?")
//!             .required()
//!             .show_if("q1", "Yes"),
//!     ],
//! );
//!
//! let mut answers = Answers::new();
//! let first = next_question(&survey, &answers).unwrap();
//! let value = validate(first, Some("no")).into_result().unwrap();
//! answers.insert(first.id().clone(), value);
//!
//! assert!(next_question(&survey, &answers).is_none());
//! assert!(is_complete(&survey, &answers));
//! ```
//!
//! ## Backends
//!
//! Interactive front-ends implement [`SurveyBackend`] and are driven by
//! [`Interview::run`]:
//! - `questionnaire-wizard-dialoguer` - CLI prompts via dialoguer
//! - [`TestBackend`] - scripted answers for tests

// Re-export all types from questionnaire-types
pub use questionnaire_types::*;

pub mod eligibility;
pub mod interview;
pub mod traversal;
pub mod validation;

pub use eligibility::is_eligible;
pub use interview::{Interview, Submission, check_answer, submit_answer};
pub use traversal::{
    Progress, SurveyStatus, is_complete, is_pending, next_question, pending_questions, progress,
};
pub use validation::{ValidationOutcome, validate};

// Test backend for running surveys without user interaction
mod test_backend;
pub use test_backend::{TestBackend, TestBackendError};
