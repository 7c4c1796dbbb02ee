//! Dialoguer backend implementation for the SurveyBackend trait.

use dialoguer::{Input, Select, theme::ColorfulTheme};
use questionnaire::{Answers, Question, QuestionKind, Rejection, SurveyBackend};
use thiserror::Error;

/// Error type for the Dialoguer backend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the survey (e.g., pressed Ctrl+C or Escape).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn map_err(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// Dialoguer backend for interactive CLI prompts.
#[derive(Debug, Default, Clone)]
pub struct DialoguerBackend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerBackend {
    /// Create a new Dialoguer backend with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a backend with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn ask_select(&self, prompt: &str, options: &[String]) -> Result<String, DialoguerError> {
        let _theme;
        let mut builder: Select;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Select::with_theme(&_theme);
        } else {
            builder = Select::new();
        }

        builder = builder.with_prompt(prompt).items(options).default(0);

        let selection = builder.interact().map_err(map_err)?;
        Ok(options[selection].clone())
    }

    fn ask_input(&self, prompt: &str) -> Result<String, DialoguerError> {
        let _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder.with_prompt(prompt).allow_empty(true);

        builder.interact_text().map_err(map_err)
    }
}

/// Prompt line for a question, with a hint for the expected input.
fn prompt_for(question: &Question) -> String {
    let marker = if question.is_required() { " *" } else { "" };
    match question.kind() {
        QuestionKind::Number => format!("{}{marker} (number)", question.ask()),
        _ => format!("{}{marker}", question.ask()),
    }
}

impl SurveyBackend for DialoguerBackend {
    type Error = DialoguerError;

    fn ask(&self, question: &Question, _answers: &Answers) -> Result<Option<String>, Self::Error> {
        let prompt = prompt_for(question);
        let raw = match question.kind() {
            // An option list cannot be empty for dialoguer's Select.
            QuestionKind::Choice(choice) if !choice.options().is_empty() => {
                self.ask_select(&prompt, choice.options())?
            }
            _ => self.ask_input(&prompt)?,
        };
        Ok(Some(raw))
    }

    fn reject(&self, _question: &Question, rejection: &Rejection) -> Result<(), Self::Error> {
        println!("Error: {}", rejection.message);
        Ok(())
    }

    fn prelude(&self, message: &str) -> Result<(), Self::Error> {
        println!("{message}");
        println!();
        Ok(())
    }

    fn epilogue(&self, message: &str) -> Result<(), Self::Error> {
        println!();
        println!("{message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creation() {
        let _backend = DialoguerBackend::new();
        let _plain = DialoguerBackend::plain();
    }

    #[test]
    fn error_types() {
        let err = DialoguerError::Cancelled;
        assert_eq!(err.to_string(), "Survey cancelled by user");

        let interrupted = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(matches!(map_err(interrupted), DialoguerError::Cancelled));

        let broken = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(map_err(broken), DialoguerError::Dialoguer(_)));
    }

    #[test]
    fn prompts_mark_required_and_numbers() {
        let q = Question::number("age", "How old are you?").required();
        assert_eq!(prompt_for(&q), "How old are you? * (number)");

        let q = Question::text("c", "Comments");
        assert_eq!(prompt_for(&q), "Comments");
    }
}
