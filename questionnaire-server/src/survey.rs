use std::path::Path;

use anyhow::Context;
use questionnaire::SurveyDefinition;
use tracing::{info, warn};

/// Load the survey at `path`, or the bundled job-satisfaction survey if the
/// file does not exist.
pub fn load_survey(path: &Path) -> anyhow::Result<SurveyDefinition> {
    let survey = if path.exists() {
        SurveyDefinition::from_path(path)
            .with_context(|| format!("Failed to load survey {}", path.display()))?
    } else {
        warn!(path = %path.display(), "Survey file not found, using bundled job_satisfaction survey");
        example_surveys::job_satisfaction()?
    };

    report_dangling_references(&survey);
    info!(
        survey_id = %survey.survey_id,
        questions = survey.len(),
        "Survey loaded"
    );
    Ok(survey)
}

/// Warn about `show_if` constraints naming questions the survey lacks.
/// Such constraints never match, so the question they guard is never shown.
pub fn report_dangling_references(survey: &SurveyDefinition) -> usize {
    let dangling = survey.dangling_references();
    for (question_id, missing) in &dangling {
        warn!(
            survey_id = %survey.survey_id,
            question_id = %question_id,
            missing = %missing,
            "show_if refers to an unknown question"
        );
    }
    dangling.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_bundled_survey() {
        let dir = tempfile::tempdir().unwrap();
        let survey = load_survey(&dir.path().join("nope.json")).unwrap();
        assert_eq!(survey.survey_id, "job_satisfaction");
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_survey(&path).is_err());
    }

    #[test]
    fn dangling_references_are_counted() {
        let survey = SurveyDefinition::from_json_str(
            r#"{
                "survey_id": "s",
                "questions": [
                    {"id": "q1", "text": "Hi?", "type": "text", "show_if": {"ghost": "Yes"}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(report_dangling_references(&survey), 1);
    }
}
