use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, QuestionId};

/// The answers collected so far in one respondent session.
///
/// A question counts as answered exactly when its id is a key here. Iteration
/// is ordered by question id so snapshots and serialized output are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<QuestionId, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer set.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert an answer, returning the value it replaced (if any).
    ///
    /// The engine itself only ever inserts answers for unanswered questions;
    /// whether an existing answer may be replaced is the caller's decision.
    pub fn insert(
        &mut self,
        id: impl Into<QuestionId>,
        value: impl Into<AnswerValue>,
    ) -> Option<AnswerValue> {
        self.values.insert(id.into(), value.into())
    }

    /// Get the answer for a question.
    pub fn get(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    /// Check if a question has been answered.
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.values.contains_key(id)
    }

    /// Get an iterator over all id-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of answered questions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been answered yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, id: impl Into<QuestionId>, value: impl Into<AnswerValue>) -> Self {
        self.insert(id, value);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Answers
where
    K: Into<QuestionId>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Answers {
    type Item = (QuestionId, AnswerValue);
    type IntoIter = std::collections::btree_map::IntoIter<QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a QuestionId, &'a AnswerValue);
    type IntoIter = std::collections::btree_map::Iter<'a, QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut answers = Answers::new();
        answers.insert("q1", "Yes");
        answers.insert("age", 30u64);

        assert_eq!(
            answers.get(&QuestionId::new("q1")),
            Some(&AnswerValue::from("Yes"))
        );
        assert_eq!(
            answers.get(&QuestionId::new("age")).and_then(AnswerValue::as_number),
            Some(30)
        );
        assert!(!answers.contains(&QuestionId::new("q2")));
    }

    #[test]
    fn serializes_as_object() {
        let answers = Answers::new().with("q2", "fine").with("q1", 4u64);
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"q1":4,"q2":"fine"}"#);
    }
}
