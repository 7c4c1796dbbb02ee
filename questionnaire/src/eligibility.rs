//! Whether a question's `show_if` precondition holds.

use crate::{Answers, Question};

/// Check if `question` may be shown given the answers collected so far.
///
/// A question without constraints is always eligible. Otherwise every
/// constraint must match the stored answer exactly; an unanswered or unknown
/// question id counts as a mismatch.
pub fn is_eligible(question: &Question, answers: &Answers) -> bool {
    question
        .condition()
        .constraints()
        .iter()
        .all(|constraint| constraint.is_satisfied_by(answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Condition, Constraint};

    #[test]
    fn unconditional_question_is_always_eligible() {
        let question = Question::text("q", "Anything?");
        assert!(is_eligible(&question, &Answers::new()));
        assert!(is_eligible(&question, &Answers::new().with("other", "x")));
    }

    #[test]
    fn single_constraint_matches_exactly() {
        let question = Question::text("q2", "Why?").show_if("q1", "Yes");

        assert!(is_eligible(&question, &Answers::new().with("q1", "Yes")));
        assert!(!is_eligible(&question, &Answers::new().with("q1", "No")));
        assert!(!is_eligible(&question, &Answers::new().with("q1", "yes")));
        assert!(!is_eligible(&question, &Answers::new()));
    }

    #[test]
    fn all_constraints_must_hold() {
        let question = Question::text("q3", "Tell us more").with_condition(Condition::new(vec![
            Constraint::new("q1", "Yes"),
            Constraint::new("age", 30u64),
        ]));

        let partial = Answers::new().with("q1", "Yes");
        let both = partial.clone().with("age", 30u64);
        let wrong_type = partial.clone().with("age", "30");

        assert!(!is_eligible(&question, &partial));
        assert!(is_eligible(&question, &both));
        assert!(!is_eligible(&question, &wrong_type));
    }

    #[test]
    fn reference_to_missing_question_never_matches() {
        let question = Question::text("q", "?").show_if("does_not_exist", "x");
        assert!(!is_eligible(&question, &Answers::new().with("q1", "x")));
    }
}
