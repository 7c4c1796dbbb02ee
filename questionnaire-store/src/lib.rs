//! Storage for live questionnaire sessions and the log of accepted answers.
//!
//! Sessions live in memory behind the [`SessionStore`] trait. Every accepted
//! answer is appended to a [`ResponseStore`], normally the SQLite-backed
//! [`SqliteResponseStore`], which also answers the analytics queries and
//! feeds the CSV export.

pub mod analytics;
pub mod error;
pub mod responses;
pub mod session;

pub use analytics::{
    CSV_HEADER, CompletionStat, ResponseCount, export_csv, export_csv_to_path,
    responses_per_question,
};
pub use error::{Result, StoreError};
pub use responses::{ResponseRecord, ResponseStore, SqliteResponseStore};
pub use session::{InMemorySessionStore, Session, SessionId, SessionStore, SharedSession, lock};
