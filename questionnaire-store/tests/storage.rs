use std::sync::Arc;
use std::thread;

use questionnaire::{AnswerValue, Question, QuestionId, SurveyDefinition};
use questionnaire_store::{
    CSV_HEADER, InMemorySessionStore, ResponseRecord, ResponseStore, SessionId, SessionStore,
    SqliteResponseStore, export_csv, export_csv_to_path, lock,
};

fn response(session: &SessionId, question: &str, answer: impl Into<AnswerValue>) -> ResponseRecord {
    ResponseRecord::new(
        session.clone(),
        "job_satisfaction",
        QuestionId::from(question),
        &answer.into(),
    )
}

fn survey() -> SurveyDefinition {
    SurveyDefinition::new(
        "job_satisfaction",
        vec![
            Question::choice("q1", "Are you satisfied?", ["Yes", "No"]).required(),
            Question::text("q3", "What would help?").required().show_if("q1", "No"),
        ],
    )
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("responses.db");
    let session = SessionId::new();

    {
        let store = SqliteResponseStore::open(&path).unwrap();
        store.record(&response(&session, "q1", "Yes")).unwrap();
        store.record(&response(&session, "q3", 5u64)).unwrap();
    }

    let store = SqliteResponseStore::open(&path).unwrap();
    let responses = store.responses().unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].session_id, session);
    assert_eq!(responses[1].answer, "5");
}

#[test]
fn csv_export_writes_header_and_rows() {
    let store = SqliteResponseStore::in_memory().unwrap();
    let session = SessionId::from_string("s-1");
    store.record(&response(&session, "q1", "No")).unwrap();
    store
        .record(&response(&session, "q4", "Long hours, little pay"))
        .unwrap();

    let mut out = Vec::new();
    let rows = export_csv(&store, &mut out).unwrap();
    assert_eq!(rows, 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[1].starts_with("s-1,job_satisfaction,q1,No,"));
    assert!(lines[2].starts_with("s-1,job_satisfaction,q4,\"Long hours, little pay\","));
}

#[test]
fn csv_export_of_empty_store_is_just_the_header() {
    let store = SqliteResponseStore::in_memory().unwrap();
    let mut out = Vec::new();
    assert_eq!(export_csv(&store, &mut out).unwrap(), 0);
    assert_eq!(String::from_utf8(out).unwrap(), format!("{CSV_HEADER}\n"));
}

#[test]
fn csv_export_to_path_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("processed").join("survey_results.csv");

    let store = SqliteResponseStore::in_memory().unwrap();
    store
        .record(&response(&SessionId::new(), "q1", "Yes"))
        .unwrap();

    assert_eq!(export_csv_to_path(&store, &path).unwrap(), 1);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn sessions_are_independent_across_threads() {
    let survey = Arc::new(survey());
    let store = Arc::new(InMemorySessionStore::new());
    let ids: Vec<SessionId> = (0..8).map(|_| store.create("job_satisfaction")).collect();

    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let store = Arc::clone(&store);
            let survey = Arc::clone(&survey);
            thread::spawn(move || {
                let shared = store.get(&id).unwrap();
                let mut session = lock(&shared);
                let status = session.record(&survey, "q1".into(), "Yes".into());
                assert!(status.is_complete());
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.list().len(), 8);
    for id in &ids {
        let shared = store.get(id).unwrap();
        let session = lock(&shared);
        assert_eq!(session.answers.len(), 1);
        assert_eq!(session.id, *id);
    }
}

#[test]
fn session_serializes_for_reporting() {
    let store = InMemorySessionStore::new();
    let id = store.create("job_satisfaction");
    let shared = store.get(&id).unwrap();
    let status = lock(&shared).record(&survey(), "q1".into(), "No".into());
    assert!(!status.is_complete());

    let json = serde_json::to_value(&*lock(&shared)).unwrap();
    assert_eq!(json["survey_id"], "job_satisfaction");
    assert_eq!(json["answers"]["q1"], "No");
    assert!(json["completed_at"].is_null());
}
