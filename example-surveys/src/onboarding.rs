use questionnaire::{Question, SurveyDefinition};

/// A short new-hire onboarding check-in.
pub fn onboarding() -> SurveyDefinition {
    SurveyDefinition::new(
        "onboarding",
        vec![
            Question::choice("team", "Which team did you join?", ["Engineering", "Sales", "Support"])
                .required(),
            Question::choice("laptop", "Did your laptop arrive on time?", ["Yes", "No"]).required(),
            Question::number("laptop_delay", "How many days late was it?")
                .required()
                .show_if("laptop", "No"),
            Question::choice(
                "oncall",
                "Have you been added to the on-call rotation?",
                ["Yes", "No"],
            )
            .show_if("team", "Engineering")
            .show_if("laptop", "Yes"),
            Question::text("buddy", "Who is your onboarding buddy?").required(),
        ],
    )
    .with_title("Onboarding Check-in")
    .with_epilogue("Welcome aboard!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use questionnaire::{Answers, is_complete, next_question};

    #[test]
    fn onboarding_is_valid() {
        let survey = onboarding();
        survey.validate().unwrap();
        assert!(survey.dangling_references().is_empty());
    }

    #[test]
    fn oncall_needs_both_conditions() {
        let survey = onboarding();
        let answers = Answers::new().with("team", "Sales").with("laptop", "Yes");
        assert_eq!(next_question(&survey, &answers).unwrap().id().as_str(), "buddy");

        let answers = Answers::new().with("team", "Engineering").with("laptop", "Yes");
        assert_eq!(next_question(&survey, &answers).unwrap().id().as_str(), "oncall");
    }

    #[test]
    fn late_laptop_branch() {
        let survey = onboarding();
        let answers = Answers::new()
            .with("team", "Engineering")
            .with("laptop", "No")
            .with("laptop_delay", 2u64)
            .with("buddy", "Sam");
        assert!(is_complete(&survey, &answers));
    }
}
