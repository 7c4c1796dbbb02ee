use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Question, QuestionId, SurveyError};

/// The top-level structure containing all questions and metadata for a survey.
///
/// Question order is significant: it is the only priority signal used when
/// choosing the next question. A definition is read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    /// Identifier recorded alongside every persisted answer.
    pub survey_id: String,

    /// Optional human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional message shown before the first question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prelude: Option<String>,

    /// All questions, in asking order.
    pub questions: Vec<Question>,

    /// Optional message shown once the survey is complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epilogue: Option<String>,
}

impl SurveyDefinition {
    /// Create a new survey definition with the given questions.
    pub fn new(survey_id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            survey_id: survey_id.into(),
            title: None,
            prelude: None,
            questions,
            epilogue: None,
        }
    }

    /// Parse and validate a survey from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SurveyError> {
        let definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Parse and validate a survey from any reader yielding JSON.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, SurveyError> {
        let definition: Self = serde_json::from_reader(reader)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Load and validate a survey from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SurveyError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Check structural soundness: a non-empty survey id and unique, non-empty question ids.
    ///
    /// `show_if` references to unknown questions are allowed; such a
    /// constraint simply never matches.
    pub fn validate(&self) -> Result<(), SurveyError> {
        if self.survey_id.trim().is_empty() {
            return Err(SurveyError::InvalidDefinition(
                "survey_id must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if question.id().is_empty() {
                return Err(SurveyError::InvalidDefinition(
                    "question id must not be empty".to_string(),
                ));
            }
            if !seen.insert(question.id()) {
                return Err(SurveyError::InvalidDefinition(format!(
                    "duplicate question id '{}'",
                    question.id()
                )));
            }
        }
        Ok(())
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the prelude message.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Set the epilogue message.
    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = Some(epilogue.into());
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by id.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// `(question, referenced id)` pairs whose `show_if` names a question
    /// that does not exist in this survey.
    pub fn dangling_references(&self) -> Vec<(&QuestionId, &QuestionId)> {
        let known: HashSet<&QuestionId> = self.questions.iter().map(Question::id).collect();
        self.questions
            .iter()
            .flat_map(|q| {
                q.condition()
                    .referenced_questions()
                    .filter(|r| !known.contains(r))
                    .map(move |r| (q.id(), r))
            })
            .collect()
    }

    /// Check if the survey has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
