//! Implementations of the `questionnaire` subcommands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use questionnaire::{Interview, SurveyDefinition, SurveyError};
use questionnaire_store::{
    InMemorySessionStore, ResponseRecord, ResponseStore, SessionId, SqliteResponseStore,
    export_csv_to_path, responses_per_question,
};
use questionnaire_wizard_dialoguer::{DialoguerBackend, DialoguerError};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::survey::{load_survey, report_dangling_references};

/// Run the HTTP API until Ctrl+C.
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let survey = load_survey(&config.survey.path)?;
    let responses = SqliteResponseStore::open(&config.storage.database).with_context(|| {
        format!(
            "Failed to open response store {}",
            config.storage.database.display()
        )
    })?;

    let state = Arc::new(AppState::new(
        survey,
        Arc::new(InMemorySessionStore::new()),
        Arc::new(responses),
    ));

    crate::server::serve(&config.server.bind, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C");
    }
}

/// Take the survey interactively in the terminal, logging every accepted
/// answer to the response store.
pub fn take(config: &AppConfig, plain: bool) -> anyhow::Result<()> {
    let survey = load_survey(&config.survey.path)?;
    let responses = SqliteResponseStore::open(&config.storage.database)?;
    let session_id = SessionId::new();

    let backend = if plain {
        DialoguerBackend::plain()
    } else {
        DialoguerBackend::new()
    };

    if let Some(title) = &survey.title {
        println!("{title}");
        println!();
    }

    let mut interview = Interview::new(&survey);
    let result = interview.run(&backend, |question, value| {
        let record = ResponseRecord::new(
            session_id.clone(),
            survey.survey_id.clone(),
            question.id().clone(),
            value,
        );
        responses.record(&record)?;
        Ok(())
    });

    let progress = interview.progress();
    match result {
        Ok(status) => {
            info!(session_id = %session_id, complete = status.is_complete(), "Interview finished");
            println!(
                "Session {session_id}: {} answers recorded.",
                progress.answered
            );
            Ok(())
        }
        Err(err) if cancelled(&err) => {
            println!();
            println!(
                "Survey cancelled. {} answers were recorded for session {session_id}.",
                progress.answered
            );
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn cancelled(err: &SurveyError) -> bool {
    match err {
        SurveyError::Backend(inner) => {
            matches!(
                inner.downcast_ref::<DialoguerError>(),
                Some(DialoguerError::Cancelled)
            )
        }
        other => other.is_cancelled(),
    }
}

/// Write the response log as CSV. Returns the path written to.
pub fn export(config: &AppConfig, output: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let store = SqliteResponseStore::open(&config.storage.database)?;
    let output = output.unwrap_or_else(|| config.storage.export.clone());
    let rows = export_csv_to_path(&store, &output)?;
    println!("Exported {rows} responses to {}", output.display());
    Ok(output)
}

/// Print response counts and per-session completion.
pub fn stats(config: &AppConfig) -> anyhow::Result<()> {
    let store = SqliteResponseStore::open(&config.storage.database)?;
    print!("{}", render_stats(&store)?);
    Ok(())
}

pub fn render_stats(store: &dyn ResponseStore) -> anyhow::Result<String> {
    use std::fmt::Write;

    let counts = store.response_counts()?;
    let completion = store.completion_stats()?;
    let mut out = String::new();

    if counts.is_empty() {
        writeln!(out, "No responses recorded yet.")?;
        return Ok(out);
    }

    writeln!(out, "Responses per question:")?;
    for (question_id, total) in responses_per_question(&counts) {
        writeln!(out, "  {question_id}: {total}")?;
        for count in counts.iter().filter(|c| c.question_id == question_id) {
            writeln!(out, "    {:<24} {}", count.answer, count.response_count)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Sessions: {}", completion.len())?;
    for stat in &completion {
        writeln!(
            out,
            "  {}: {} questions answered",
            stat.session_id, stat.answered_questions
        )?;
    }
    Ok(out)
}

/// Load the configured survey strictly and report problems.
pub fn check(config: &AppConfig) -> anyhow::Result<SurveyDefinition> {
    let path = &config.survey.path;
    let survey = SurveyDefinition::from_path(path)
        .with_context(|| format!("Failed to load survey {}", path.display()))?;

    let dangling = report_dangling_references(&survey);
    println!(
        "Survey '{}' is valid: {} questions, {} dangling show_if references.",
        survey.survey_id,
        survey.len(),
        dangling
    );
    Ok(survey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use questionnaire::{AnswerValue, QuestionId};

    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.database = dir.join("responses.db");
        config.storage.export = dir.join("out").join("results.csv");
        config.survey.path = dir.join("survey.json");
        config
    }

    #[test]
    fn stats_for_empty_store() {
        let store = SqliteResponseStore::in_memory().unwrap();
        assert_eq!(render_stats(&store).unwrap(), "No responses recorded yet.\n");
    }

    #[test]
    fn stats_lists_questions_and_sessions() {
        let store = SqliteResponseStore::in_memory().unwrap();
        let session = SessionId::from_string("s-1");
        for (question, answer) in [("q1", "Yes"), ("q2", "Team")] {
            store
                .record(&ResponseRecord::new(
                    session.clone(),
                    "job_satisfaction",
                    QuestionId::from(question),
                    &AnswerValue::from(answer),
                ))
                .unwrap();
        }

        let text = render_stats(&store).unwrap();
        assert!(text.contains("  q1: 1"));
        assert!(text.contains("Team"));
        assert!(text.contains("Sessions: 1"));
        assert!(text.contains("s-1: 2 questions answered"));
    }

    #[test]
    fn export_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let written = export(&config, None).unwrap();
        assert_eq!(written, config.storage.export);
        assert!(written.exists());
    }

    #[test]
    fn check_requires_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(check(&config).is_err());

        std::fs::write(&config.survey.path, example_surveys::JOB_SATISFACTION_JSON).unwrap();
        assert_eq!(check(&config).unwrap().survey_id, "job_satisfaction");
    }

    #[test]
    fn cancellation_is_recognised() {
        let err = SurveyError::backend(DialoguerError::Cancelled);
        assert!(cancelled(&err));
        assert!(cancelled(&SurveyError::Cancelled));
        assert!(!cancelled(&SurveyError::backend(anyhow::anyhow!("boom"))));
    }
}
