use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use questionnaire::{
    Question, QuestionId, SurveyStatus, ValidationOutcome, check_answer,
    next_question as first_pending, progress,
};
use questionnaire_store::{ResponseRecord, SessionId, lock};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// POST /start-survey
pub async fn start_survey(State(state): State<Arc<AppState>>) -> Json<Value> {
    let session_id = state.sessions.create(&state.survey.survey_id);
    info!(session_id = %session_id, survey_id = %state.survey.survey_id, "Survey started");

    Json(json!({
        "session_id": session_id,
        "survey_id": state.survey.survey_id,
        "message": "Survey started successfully",
    }))
}

// GET /next-question/{session_id}
pub async fn next_question(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let shared = state
        .sessions
        .get(&SessionId::from_string(&session_id))
        .ok_or(ApiError::InvalidSession)?;
    let session = lock(&shared);

    let body = match first_pending(&state.survey, &session.answers) {
        Some(question) => json!({
            "completed": false,
            "question": question_json(question),
        }),
        None => json!({
            "completed": true,
            "message": "Survey completed",
        }),
    };
    Ok(Json(body))
}

fn question_json(question: &Question) -> Value {
    json!({
        "id": question.id(),
        "text": question.ask(),
        "type": question.kind().tag(),
        "options": question.options(),
    })
}

#[derive(Deserialize)]
pub struct SubmitAnswerBody {
    pub session_id: String,
    pub question_id: String,
    #[serde(default)]
    pub answer: Option<Value>,
}

// Strings are taken as typed; numbers and other JSON values by their JSON text.
fn raw_answer(answer: &Value) -> Option<String> {
    match answer {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// POST /submit-answer
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitAnswerBody>,
) -> Result<Json<Value>, ApiError> {
    let session_id = SessionId::from_string(&body.session_id);
    let shared = state
        .sessions
        .get(&session_id)
        .ok_or(ApiError::InvalidSession)?;

    // Held until the answer is persisted and recorded.
    let mut session = lock(&shared);

    let question_id = QuestionId::new(body.question_id);
    let raw = body.answer.as_ref().and_then(raw_answer);
    let (question, outcome) =
        check_answer(&state.survey, &session.answers, &question_id, raw.as_deref())?;

    let value = match outcome {
        ValidationOutcome::Accepted(value) => value,
        ValidationOutcome::Rejected(rejection) => return Err(ApiError::Rejected(rejection)),
    };

    let record = ResponseRecord::new(
        session_id.clone(),
        state.survey.survey_id.clone(),
        question.id().clone(),
        &value,
    );
    state.responses.record(&record)?;

    let status = session.record(&state.survey, question_id, value);
    info!(
        session_id = %session_id,
        question_id = %record.question_id,
        completed = status.is_complete(),
        "Answer recorded"
    );

    Ok(Json(json!({
        "message": "Answer recorded",
        "completed": status.is_complete(),
    })))
}

// GET /sessions/{session_id}
pub async fn session_summary(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let shared = state
        .sessions
        .get(&SessionId::from_string(&session_id))
        .ok_or(ApiError::InvalidSession)?;
    let session = lock(&shared);
    let progress = progress(&state.survey, &session.answers);

    Ok(Json(json!({
        "session_id": session.id,
        "survey_id": session.survey_id,
        "answers": session.answers,
        "completed": SurveyStatus::of(&state.survey, &session.answers).is_complete(),
        "answered": progress.answered,
        "remaining": progress.remaining,
        "started_at": session.started_at,
        "completed_at": session.completed_at,
    })))
}

// DELETE /sessions/{session_id}
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = SessionId::from_string(&session_id);
    if !state.sessions.delete(&session_id) {
        return Err(ApiError::InvalidSession);
    }
    info!(session_id = %session_id, "Session ended");
    Ok(StatusCode::NO_CONTENT)
}

// GET /analytics/response-counts
pub async fn response_counts(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let counts = state.responses.response_counts()?;
    Ok(Json(json!(counts)))
}

// GET /analytics/completion-stats
pub async fn completion_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let stats = state.responses.completion_stats()?;
    Ok(Json(json!(stats)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_answer_forms() {
        assert_eq!(raw_answer(&json!("Yes")), Some("Yes".to_string()));
        assert_eq!(raw_answer(&json!(4)), Some("4".to_string()));
        assert_eq!(raw_answer(&Value::Null), None);
    }

    #[test]
    fn choice_question_lists_options() {
        let question = Question::choice("q1", "Satisfied?", ["Yes", "No"]);
        let json = question_json(&question);
        assert_eq!(json["type"], "choice");
        assert_eq!(json["options"], json!(["Yes", "No"]));

        let json = question_json(&Question::number("q3", "Years?"));
        assert_eq!(json["type"], "number");
        assert!(json["options"].is_null());
    }
}
