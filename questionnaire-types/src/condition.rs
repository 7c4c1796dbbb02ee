use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{AnswerValue, Answers, QuestionId};

/// One equality constraint of a `show_if` precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// The question whose answer is inspected.
    pub question: QuestionId,

    /// The normalized answer it must hold.
    pub equals: AnswerValue,
}

impl Constraint {
    /// Create a new equality constraint.
    pub fn new(question: impl Into<QuestionId>, equals: impl Into<AnswerValue>) -> Self {
        Self {
            question: question.into(),
            equals: equals.into(),
        }
    }

    /// Check the constraint against collected answers.
    ///
    /// A missing answer never matches.
    pub fn is_satisfied_by(&self, answers: &Answers) -> bool {
        answers.get(&self.question) == Some(&self.equals)
    }
}

/// A question's display precondition (`show_if`): constraints that must all hold.
///
/// In survey JSON this is an object mapping question ids to expected values,
/// e.g. `{"q1": "Yes"}`. Declaration order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    constraints: Vec<Constraint>,
}

impl Condition {
    /// A condition with no constraints (always satisfied).
    pub fn always() -> Self {
        Self::default()
    }

    /// Create a condition from a list of constraints.
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    /// Add an equality constraint.
    pub fn and(mut self, question: impl Into<QuestionId>, equals: impl Into<AnswerValue>) -> Self {
        self.constraints.push(Constraint::new(question, equals));
        self
    }

    /// Get the constraints in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Check if there are no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Ids referenced by this condition.
    pub fn referenced_questions(&self) -> impl Iterator<Item = &QuestionId> {
        self.constraints.iter().map(|c| &c.question)
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.constraints.len()))?;
        for constraint in &self.constraints {
            map.serialize_entry(&constraint.question, &constraint.equals)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConditionVisitor;

        impl<'de> Visitor<'de> for ConditionVisitor {
            type Value = Condition;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping question ids to expected answers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut constraints: Vec<Constraint> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((question, equals)) =
                    access.next_entry::<QuestionId, AnswerValue>()?
                {
                    // A repeated key keeps its first position and takes the last value.
                    match constraints.iter_mut().find(|c| c.question == question) {
                        Some(existing) => existing.equals = equals,
                        None => constraints.push(Constraint { question, equals }),
                    }
                }
                Ok(Condition { constraints })
            }
        }

        deserializer.deserialize_map(ConditionVisitor)
    }
}
