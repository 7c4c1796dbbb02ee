use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use questionnaire::{Rejection, SurveyError};
use questionnaire_store::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure of an API request, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid session ID")]
    InvalidSession,

    #[error("Question not found")]
    QuestionNotFound,

    #[error("Question already answered")]
    AlreadyAnswered,

    #[error("{0}")]
    Rejected(Rejection),

    #[error("Storage error")]
    Storage(#[from] StoreError),

    #[error("Internal error")]
    Internal(SurveyError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSession | Self::QuestionNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyAnswered => StatusCode::CONFLICT,
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SurveyError> for ApiError {
    fn from(err: SurveyError) -> Self {
        match err {
            SurveyError::UnknownQuestion(_) => Self::QuestionNotFound,
            SurveyError::AlreadyAnswered(_) => Self::AlreadyAnswered,
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Rejected(rejection) => json!({
                "detail": rejection.message,
                "kind": rejection.kind,
            }),
            Self::Storage(e) => {
                error!(error = %e, "Response store failure");
                json!({ "detail": self.to_string() })
            }
            Self::Internal(e) => {
                error!(error = %e, "Request failed");
                json!({ "detail": self.to_string() })
            }
            _ => json!({ "detail": self.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}
