use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized answer value.
///
/// This is the value stored in `Answers` for each answered question and the
/// value a `show_if` constraint expects. Choice answers are stored as `Text`
/// holding the option exactly as the survey spells it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A non-negative integer (from number questions).
    Number(u64),

    /// A trimmed string or canonical option (text, choice and free-form questions).
    Text(String),
}

impl AnswerValue {
    /// Try to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Try to get this value as a number.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Get the type name of this value for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Text(_) => "Text",
        }
    }
}

/// Renders the bare value; this is the form written to the response log.
impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for AnswerValue {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for AnswerValue {
    fn from(n: u32) -> Self {
        Self::Number(u64::from(n))
    }
}
