use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a raw answer was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// A required question got an empty answer.
    Required,

    /// A number question got something other than a digit string.
    InvalidNumber,

    /// A choice question got something that is not one of its options.
    UnknownOption,

    /// A text question got fewer than two characters.
    TooShort,
}

/// A structured rejection: the kind plus the message shown to the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
}

impl Rejection {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
