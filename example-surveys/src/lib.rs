//! Survey definitions bundled with the workspace.
//!
//! `job_satisfaction` is the survey the server falls back to when no survey
//! file is configured. `onboarding` is built in code to show the builder API.

mod job_satisfaction;
mod onboarding;

pub use job_satisfaction::{JOB_SATISFACTION_JSON, job_satisfaction};
pub use onboarding::onboarding;

use questionnaire::SurveyDefinition;

/// All bundled surveys.
pub fn all() -> anyhow::Result<Vec<SurveyDefinition>> {
    Ok(vec![job_satisfaction()?, onboarding()])
}

/// Find a bundled survey by its `survey_id`.
pub fn by_id(survey_id: &str) -> anyhow::Result<Option<SurveyDefinition>> {
    Ok(all()?.into_iter().find(|s| s.survey_id == survey_id))
}
