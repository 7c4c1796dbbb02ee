//! Aggregates over the response log and CSV export.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use questionnaire::QuestionId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::responses::ResponseStore;
use crate::session::SessionId;

/// Number of times `answer` was given to `question_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCount {
    pub question_id: QuestionId,
    pub answer: String,
    pub response_count: i64,
}

/// Number of distinct questions a session has answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionStat {
    pub session_id: SessionId,
    pub answered_questions: i64,
}

/// Total responses per question, summed over all answers.
pub fn responses_per_question(counts: &[ResponseCount]) -> BTreeMap<QuestionId, i64> {
    let mut totals = BTreeMap::new();
    for count in counts {
        *totals.entry(count.question_id.clone()).or_insert(0) += count.response_count;
    }
    totals
}

pub const CSV_HEADER: &str = "session_id,survey_id,question_id,answer,created_at";

/// Write every response as CSV. Returns the number of data rows written.
pub fn export_csv<W: Write>(store: &dyn ResponseStore, mut writer: W) -> Result<usize> {
    let responses = store.responses()?;

    writeln!(writer, "{CSV_HEADER}")?;
    for response in &responses {
        writeln!(
            writer,
            "{},{},{},{},{}",
            csv_field(response.session_id.as_str()),
            csv_field(&response.survey_id),
            csv_field(response.question_id.as_str()),
            csv_field(&response.answer),
            response.created_at.to_rfc3339(),
        )?;
    }
    writer.flush()?;

    Ok(responses.len())
}

/// Export to a file, creating its parent directory if needed.
pub fn export_csv_to_path(store: &dyn ResponseStore, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let rows = export_csv(store, BufWriter::new(File::create(path)?))?;
    info!(path = %path.display(), rows, "Responses exported");
    Ok(rows)
}

// Quote fields containing separators, quotes or line breaks; double embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
