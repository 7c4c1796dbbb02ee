use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use questionnaire::{AnswerValue, QuestionId};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::{CompletionStat, ResponseCount};
use crate::error::Result;
use crate::session::{SessionId, lock};

/// One accepted answer, as written to the response log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub session_id: SessionId,
    pub survey_id: String,
    pub question_id: QuestionId,
    /// The normalized answer in its display form.
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl ResponseRecord {
    pub fn new(
        session_id: SessionId,
        survey_id: impl Into<String>,
        question_id: QuestionId,
        value: &AnswerValue,
    ) -> Self {
        Self {
            session_id,
            survey_id: survey_id.into(),
            question_id,
            answer: value.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only log of accepted answers plus the aggregate queries over it.
pub trait ResponseStore: Send + Sync {
    /// Persist one accepted answer.
    fn record(&self, response: &ResponseRecord) -> Result<()>;

    /// All responses in insertion order.
    fn responses(&self) -> Result<Vec<ResponseRecord>>;

    /// How often each answer was given, per question.
    fn response_counts(&self) -> Result<Vec<ResponseCount>>;

    /// How many distinct questions each session answered.
    fn completion_stats(&self) -> Result<Vec<CompletionStat>>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS responses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id TEXT NOT NULL,
        survey_id TEXT NOT NULL,
        question_id TEXT NOT NULL,
        answer TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_responses_session
        ON responses(session_id, id);";

/// SQLite-backed response log.
pub struct SqliteResponseStore {
    conn: Mutex<Connection>,
}

impl SqliteResponseStore {
    /// Open or create a response database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn.execute_batch(SCHEMA)?;

        debug!(path = %path.display(), "Response store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl ResponseStore for SqliteResponseStore {
    fn record(&self, response: &ResponseRecord) -> Result<()> {
        let conn = lock(&self.conn);
        conn.execute(
            "INSERT INTO responses (session_id, survey_id, question_id, answer, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                response.session_id.as_str(),
                response.survey_id,
                response.question_id.as_str(),
                response.answer,
                response
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        debug!(
            session = %response.session_id,
            question = %response.question_id,
            "Response persisted"
        );
        Ok(())
    }

    fn responses(&self) -> Result<Vec<ResponseRecord>> {
        let conn = lock(&self.conn);
        let mut stmt = conn.prepare(
            "SELECT session_id, survey_id, question_id, answer, created_at
             FROM responses ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(session_id, survey_id, question_id, answer, created_at)| -> Result<ResponseRecord> {
                let created_at = DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc);
                Ok(ResponseRecord {
                    session_id: SessionId::from_string(&session_id),
                    survey_id,
                    question_id: QuestionId::new(question_id),
                    answer,
                    created_at,
                })
            })
            .collect()
    }

    fn response_counts(&self) -> Result<Vec<ResponseCount>> {
        let conn = lock(&self.conn);
        let mut stmt = conn.prepare(
            "SELECT question_id, answer, COUNT(*) AS response_count
             FROM responses
             GROUP BY question_id, answer
             ORDER BY question_id, response_count DESC, answer",
        )?;

        let counts = stmt
            .query_map([], |row| {
                Ok(ResponseCount {
                    question_id: QuestionId::new(row.get::<_, String>(0)?),
                    answer: row.get(1)?,
                    response_count: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(counts)
    }

    fn completion_stats(&self) -> Result<Vec<CompletionStat>> {
        let conn = lock(&self.conn);
        let mut stmt = conn.prepare(
            "SELECT session_id, COUNT(DISTINCT question_id) AS answered_questions
             FROM responses
             GROUP BY session_id
             ORDER BY session_id",
        )?;

        let stats = stmt
            .query_map([], |row| {
                Ok(CompletionStat {
                    session_id: SessionId::from_string(&row.get::<_, String>(0)?),
                    answered_questions: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(stats)
    }
}
