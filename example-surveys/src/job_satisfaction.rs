use questionnaire::SurveyDefinition;

/// The job-satisfaction survey as shipped in `surveys/job_satisfaction.json`.
pub const JOB_SATISFACTION_JSON: &str = include_str!("../../surveys/job_satisfaction.json");

/// Satisfied respondents are asked what they like, unsatisfied ones what
/// would help; everyone then answers the remaining questions.
pub fn job_satisfaction() -> anyhow::Result<SurveyDefinition> {
    Ok(SurveyDefinition::from_json_str(JOB_SATISFACTION_JSON)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use questionnaire::{Answers, Interview, Submission, TestBackend, next_question};

    #[test]
    fn bundled_survey_loads() {
        let survey = job_satisfaction().unwrap();
        assert_eq!(survey.survey_id, "job_satisfaction");
        assert_eq!(survey.len(), 6);
        assert!(survey.dangling_references().is_empty());
    }

    #[test]
    fn satisfied_branch_skips_improvement_question() {
        let survey = job_satisfaction().unwrap();
        let answers = Answers::new().with("q1", "Yes");
        assert_eq!(next_question(&survey, &answers).unwrap().id().as_str(), "q2");

        let answers = answers.with("q2", "Team");
        assert_eq!(next_question(&survey, &answers).unwrap().id().as_str(), "q4");
    }

    #[test]
    fn unsatisfied_branch_asks_for_improvements() {
        let survey = job_satisfaction().unwrap();
        let mut interview = Interview::new(&survey);

        let submission = interview.submit(&"q1".into(), Some("no")).unwrap();
        assert!(matches!(submission, Submission::Recorded { .. }));
        assert_eq!(interview.next_question().unwrap().id().as_str(), "q3");
    }

    #[test]
    fn full_run_with_scripted_answers() {
        let survey = job_satisfaction().unwrap();
        let backend = TestBackend::new()
            .with_answer("q1", "Yes")
            .with_answer("q2", "growth")
            .with_answers("q4", ["three", "3"])
            .with_answer("q5", "Maybe")
            .with_answer("q6", "All good");

        let mut interview = Interview::new(&survey);
        let status = interview.run(&backend, |_, _| Ok(())).unwrap();

        assert!(status.is_complete());
        assert_eq!(interview.answers().get(&"q2".into()).unwrap().as_str(), Some("Growth"));
        assert_eq!(interview.answers().get(&"q4".into()).unwrap().as_number(), Some(3));
        assert_eq!(backend.rejections().len(), 1);
    }
}
