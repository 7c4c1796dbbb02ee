use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a question, unique within one survey (e.g. `"q1"`).
///
/// Used as the key in `Answers` and as the reference target of `show_if`
/// constraints.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create a new question id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the id is empty (never valid in a loaded survey).
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for QuestionId {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl AsRef<str> for QuestionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let id = QuestionId::new("satisfaction");
        assert_eq!(format!("{id}"), "satisfaction");
    }

    #[test]
    fn blank_is_empty() {
        assert!(QuestionId::new("  ").is_empty());
        assert!(!QuestionId::new("q1").is_empty());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: QuestionId = serde_json::from_str("\"q7\"").unwrap();
        assert_eq!(id.as_str(), "q7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"q7\"");
    }
}
