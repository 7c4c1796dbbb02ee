//! Per-type answer validation and normalization.

use std::collections::HashMap;

use crate::{AnswerValue, ChoiceQuestion, Question, QuestionKind, Rejection, RejectionKind};

pub const REQUIRED_MESSAGE: &str = "This question is required. Please provide an answer.";
pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number.";
pub const TOO_SHORT_MESSAGE: &str = "Please provide a more meaningful response.";

/// Minimum length, in characters, of an accepted text answer.
pub const MIN_TEXT_LEN: usize = 2;

/// Result of validating one raw answer. Exactly one of accepted or rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The normalized value to store.
    Accepted(AnswerValue),

    /// Why the answer was refused; the respondent should be asked again.
    Rejected(Rejection),
}

impl ValidationOutcome {
    fn reject(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self::Rejected(Rejection::new(kind, message))
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The normalized value, if accepted.
    pub fn value(&self) -> Option<&AnswerValue> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection, if rejected.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    pub fn into_result(self) -> Result<AnswerValue, Rejection> {
        match self {
            Self::Accepted(value) => Ok(value),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Validate and normalize a raw answer for `question`.
///
/// The input is trimmed first and a missing answer counts as empty. A
/// required question refuses empty input before any type rule runs. For
/// optional questions the type rule still applies to empty input, so an
/// empty optional number, choice or text answer is rejected while an empty
/// free-form answer is accepted.
pub fn validate(question: &Question, raw: Option<&str>) -> ValidationOutcome {
    let answer = raw.unwrap_or_default().trim();

    if question.is_required() && answer.is_empty() {
        return ValidationOutcome::reject(RejectionKind::Required, REQUIRED_MESSAGE);
    }

    match question.kind() {
        QuestionKind::Number => validate_number(answer),
        QuestionKind::Choice(choice) => validate_choice(choice, answer),
        QuestionKind::Text => validate_text(answer),
        QuestionKind::Other(_) => ValidationOutcome::Accepted(AnswerValue::from(answer)),
    }
}

fn validate_number(answer: &str) -> ValidationOutcome {
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationOutcome::reject(RejectionKind::InvalidNumber, INVALID_NUMBER_MESSAGE);
    }
    // Digit strings past u64::MAX are refused the same way.
    match answer.parse::<u64>() {
        Ok(n) => ValidationOutcome::Accepted(AnswerValue::Number(n)),
        Err(_) => ValidationOutcome::reject(RejectionKind::InvalidNumber, INVALID_NUMBER_MESSAGE),
    }
}

fn validate_choice(choice: &ChoiceQuestion, answer: &str) -> ValidationOutcome {
    // Later options win when two differ only by case.
    let by_lowercase: HashMap<String, &String> = choice
        .options()
        .iter()
        .map(|option| (option.to_lowercase(), option))
        .collect();

    match by_lowercase.get(&answer.to_lowercase()) {
        Some(canonical) => ValidationOutcome::Accepted(AnswerValue::Text((*canonical).clone())),
        None => ValidationOutcome::reject(
            RejectionKind::UnknownOption,
            format!("Please choose one of these options: {:?}", choice.options()),
        ),
    }
}

fn validate_text(answer: &str) -> ValidationOutcome {
    if answer.chars().count() < MIN_TEXT_LEN {
        return ValidationOutcome::reject(RejectionKind::TooShort, TOO_SHORT_MESSAGE);
    }
    ValidationOutcome::Accepted(AnswerValue::from(answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_kind(outcome: ValidationOutcome) -> RejectionKind {
        outcome.rejection().expect("expected a rejection").kind
    }

    #[test]
    fn number_accepts_digits() {
        let q = Question::number("n", "How many?");
        assert_eq!(validate(&q, Some("42")), ValidationOutcome::Accepted(42u64.into()));
        assert_eq!(validate(&q, Some("  007 ")), ValidationOutcome::Accepted(7u64.into()));
    }

    #[test]
    fn number_rejects_non_digits() {
        let q = Question::number("n", "How many?");
        for raw in ["4a", "-1", "+1", "1.5", "1 000", "", "²"] {
            let outcome = validate(&q, Some(raw));
            assert_eq!(
                outcome,
                ValidationOutcome::Rejected(Rejection::new(
                    RejectionKind::InvalidNumber,
                    INVALID_NUMBER_MESSAGE
                )),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn number_accepts_only_ascii_digits() {
        let q = Question::number("n", "How many?");
        for raw in ["\u{0663}", "\u{0967}\u{0968}", "\u{FF15}"] {
            assert_eq!(
                rejected_kind(validate(&q, Some(raw))),
                RejectionKind::InvalidNumber,
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn number_rejects_overflow() {
        let q = Question::number("n", "How many?");
        assert_eq!(
            rejected_kind(validate(&q, Some("99999999999999999999999"))),
            RejectionKind::InvalidNumber
        );
    }

    #[test]
    fn required_check_runs_first() {
        let q = Question::number("n", "How many?").required();
        let outcome = validate(&q, Some("   "));
        assert_eq!(
            outcome.rejection().map(|r| r.message.as_str()),
            Some(REQUIRED_MESSAGE)
        );
        assert_eq!(rejected_kind(validate(&q, None)), RejectionKind::Required);
    }

    #[test]
    fn choice_returns_canonical_casing() {
        let q = Question::choice("c", "Happy?", ["Yes", "No"]);
        assert_eq!(validate(&q, Some("yes")), ValidationOutcome::Accepted("Yes".into()));
        assert_eq!(validate(&q, Some(" NO ")), ValidationOutcome::Accepted("No".into()));
    }

    #[test]
    fn choice_rejection_lists_options() {
        let q = Question::choice("c", "Happy?", ["Yes", "No"]);
        let outcome = validate(&q, Some("maybe"));
        assert_eq!(
            outcome.rejection().unwrap().message,
            r#"Please choose one of these options: ["Yes", "No"]"#
        );
    }

    #[test]
    fn text_needs_two_characters() {
        let q = Question::text("t", "Comments");
        assert_eq!(validate(&q, Some("ok")), ValidationOutcome::Accepted("ok".into()));
        assert_eq!(rejected_kind(validate(&q, Some("a"))), RejectionKind::TooShort);
        assert_eq!(rejected_kind(validate(&q, Some(" a "))), RejectionKind::TooShort);
        assert_eq!(validate(&q, Some("é!")), ValidationOutcome::Accepted("é!".into()));
    }

    #[test]
    fn unknown_type_accepts_anything() {
        let q = Question::new("d", "When?", QuestionKind::Other("date".into()));
        assert_eq!(validate(&q, Some("  ")), ValidationOutcome::Accepted("".into()));
        assert_eq!(
            validate(&q, Some(" tomorrow ")),
            ValidationOutcome::Accepted("tomorrow".into())
        );
    }

    #[test]
    fn outcome_accessors() {
        let accepted = ValidationOutcome::Accepted("x".into());
        assert!(accepted.is_accepted());
        assert_eq!(accepted.value(), Some(&AnswerValue::from("x")));
        assert_eq!(accepted.into_result(), Ok(AnswerValue::from("x")));
    }
}
