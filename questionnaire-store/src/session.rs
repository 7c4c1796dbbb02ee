use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use questionnaire::{AnswerValue, Answers, QuestionId, SurveyDefinition, SurveyStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique respondent session identifier.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One respondent's progress through one survey.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub survey_id: String,
    pub answers: Answers,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once, the first time an answer makes the survey complete.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: SessionId, survey_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            survey_id: survey_id.into(),
            answers: Answers::new(),
            started_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Store an accepted answer and re-evaluate completion.
    pub fn record(
        &mut self,
        survey: &SurveyDefinition,
        question_id: QuestionId,
        value: AnswerValue,
    ) -> SurveyStatus {
        let now = Utc::now();
        self.answers.insert(question_id, value);
        self.updated_at = now;

        let status = SurveyStatus::of(survey, &self.answers);
        if status.is_complete() && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        status
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// A session shared between request handlers.
///
/// Holding the lock for the whole validate-record-persist step keeps
/// submissions for one session strictly one at a time, while other sessions
/// carry on independently.
pub type SharedSession = Arc<Mutex<Session>>;

/// Lock a mutex, recovering the data if a previous holder panicked.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Session bookkeeping: create, look up, replace and drop sessions by id.
pub trait SessionStore: Send + Sync {
    /// Start a new, empty session for `survey_id`.
    fn create(&self, survey_id: &str) -> SessionId;

    /// Get a handle to a live session.
    fn get(&self, id: &SessionId) -> Option<SharedSession>;

    /// Replace the stored state of an existing session. Returns `false` if
    /// the session is unknown.
    fn update(&self, session: Session) -> bool;

    /// Drop a session. Returns `false` if it was unknown.
    fn delete(&self, id: &SessionId) -> bool;

    /// Ids of all live sessions.
    fn list(&self) -> Vec<SessionId>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, survey_id: &str) -> SessionId {
        let id = SessionId::new();
        let session = Session::new(id.clone(), survey_id);
        lock(&self.sessions).insert(id.clone(), Arc::new(Mutex::new(session)));
        id
    }

    fn get(&self, id: &SessionId) -> Option<SharedSession> {
        lock(&self.sessions).get(id).cloned()
    }

    fn update(&self, session: Session) -> bool {
        let Some(shared) = self.get(&session.id) else {
            return false;
        };
        *lock(&shared) = session;
        true
    }

    fn delete(&self, id: &SessionId) -> bool {
        lock(&self.sessions).remove(id).is_some()
    }

    fn list(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = lock(&self.sessions).keys().cloned().collect();
        ids.sort();
        ids
    }
}
