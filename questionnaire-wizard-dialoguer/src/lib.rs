//! # questionnaire-wizard-dialoguer
//!
//! Dialoguer wizard backend for questionnaire.
//!
//! Questions are presented one at a time in a classic CLI wizard style. The
//! interview loop picks the next question and validates every answer; a
//! rejected answer is printed and the question is asked again.
//!
//! ## Example
//!
//! ```rust,ignore
//! use questionnaire::{Interview, SurveyDefinition};
//! use questionnaire_wizard_dialoguer::DialoguerBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let survey = SurveyDefinition::from_path("surveys/job_satisfaction.json")?;
//!     let mut interview = Interview::new(&survey);
//!     interview.run(&DialoguerBackend::new(), |_, _| Ok(()))?;
//!     println!("{:#?}", interview.answers());
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerBackend, DialoguerError};
