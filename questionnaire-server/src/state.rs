use std::sync::Arc;

use questionnaire::SurveyDefinition;
use questionnaire_store::{
    InMemorySessionStore, ResponseStore, SessionStore, SqliteResponseStore, StoreError,
};

/// Shared application state for axum handlers.
pub struct AppState {
    pub survey: Arc<SurveyDefinition>,
    pub sessions: Arc<dyn SessionStore>,
    pub responses: Arc<dyn ResponseStore>,
}

impl AppState {
    pub fn new(
        survey: SurveyDefinition,
        sessions: Arc<dyn SessionStore>,
        responses: Arc<dyn ResponseStore>,
    ) -> Self {
        Self {
            survey: Arc::new(survey),
            sessions,
            responses,
        }
    }

    /// State backed by in-memory sessions and an in-memory response log.
    pub fn in_memory(survey: SurveyDefinition) -> Result<Self, StoreError> {
        Ok(Self::new(
            survey,
            Arc::new(InMemorySessionStore::new()),
            Arc::new(SqliteResponseStore::in_memory()?),
        ))
    }
}
