use serde::{Deserialize, Serialize};

use crate::{AnswerValue, Condition, QuestionId};

/// A single question in a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDocument", into = "QuestionDocument")]
pub struct Question {
    /// Identifier, unique within the survey.
    id: QuestionId,

    /// The prompt text shown to the respondent.
    text: String,

    /// The kind of question (determines how answers are validated).
    kind: QuestionKind,

    /// Whether an empty answer is refused outright.
    required: bool,

    /// Display precondition over earlier answers.
    show_if: Condition,
}

impl Question {
    /// Create a new, optional, unconditional question.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            required: false,
            show_if: Condition::always(),
        }
    }

    /// Shorthand for a number question.
    pub fn number(id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::Number)
    }

    /// Shorthand for a text question.
    pub fn text(id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::Text)
    }

    /// Shorthand for a choice question.
    pub fn choice<I, S>(id: impl Into<QuestionId>, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, text, QuestionKind::Choice(ChoiceQuestion::new(options)))
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Replace the display precondition.
    pub fn with_condition(mut self, show_if: Condition) -> Self {
        self.show_if = show_if;
        self
    }

    /// Add one `show_if` equality constraint.
    pub fn show_if(mut self, question: impl Into<QuestionId>, equals: impl Into<AnswerValue>) -> Self {
        self.show_if = self.show_if.and(question, equals);
        self
    }

    /// Get the question id.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Get the prompt text.
    pub fn ask(&self) -> &str {
        &self.text
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Check if the question is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the display precondition.
    pub fn condition(&self) -> &Condition {
        &self.show_if
    }

    /// The declared options, for choice questions.
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            QuestionKind::Choice(choice) => Some(choice.options()),
            _ => None,
        }
    }
}

/// The kind of question, determining how raw answers are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Non-negative integer, digits only.
    Number,

    /// Pick one of a fixed list of options (matched case-insensitively).
    Choice(ChoiceQuestion),

    /// Free text of at least two characters.
    Text,

    /// Any other type tag; answers are accepted as typed.
    Other(String),
}

impl QuestionKind {
    /// Build a kind from its wire tag.
    pub fn from_tag(tag: &str, options: Option<Vec<String>>) -> Self {
        match tag {
            "number" => Self::Number,
            "choice" => Self::Choice(ChoiceQuestion::new(options.unwrap_or_default())),
            "text" => Self::Text,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire tag (`"number"`, `"choice"`, `"text"` or the original unknown tag).
    pub fn tag(&self) -> &str {
        match self {
            Self::Number => "number",
            Self::Choice(_) => "choice",
            Self::Text => "text",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Choice(_))
    }
}

/// Configuration for a choice question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceQuestion {
    /// The options in declared order and canonical casing.
    pub options: Vec<String>,
}

impl ChoiceQuestion {
    /// Create a new choice question with the given options.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the options.
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// The JSON shape of a question: `{id, text, type, required?, options?, show_if?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuestionDocument {
    id: QuestionId,
    text: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_if: Option<Condition>,
}

impl TryFrom<QuestionDocument> for Question {
    type Error = String;

    fn try_from(doc: QuestionDocument) -> Result<Self, Self::Error> {
        if doc.id.is_empty() {
            return Err("question id must not be empty".to_string());
        }
        Ok(Self {
            kind: QuestionKind::from_tag(&doc.kind, doc.options),
            id: doc.id,
            text: doc.text,
            required: doc.required,
            show_if: doc.show_if.unwrap_or_default(),
        })
    }
}

impl From<Question> for QuestionDocument {
    fn from(question: Question) -> Self {
        let kind = question.kind.tag().to_string();
        let options = match question.kind {
            QuestionKind::Choice(choice) => Some(choice.options),
            _ => None,
        };
        Self {
            id: question.id,
            text: question.text,
            kind,
            required: question.required,
            options,
            show_if: (!question.show_if.is_empty()).then_some(question.show_if),
        }
    }
}
