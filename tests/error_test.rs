//! Error case tests

use pszl_common::MatchOptions;
use pszl_search::audit::AuditLog;
use pszl_search::auth::Credential;
use pszl_search::error::SearchError;
use pszl_search::loader::load_workbook;
use pszl_search::session::{SearchOutcome, Session};
use tempfile::tempdir;

fn session_in(dir: &std::path::Path) -> Session {
    Session::new(
        MatchOptions::default(),
        AuditLog::new(dir.join("query_logs.csv")),
        10,
    )
}

/// Corrupt bytes are a parse error
#[test]
fn test_load_corrupt_workbook() {
    let result = load_workbook(b"PK\x03\x04 not really a zip");
    assert!(matches!(result, Err(SearchError::Parse(_))));
}

/// Search before any upload
#[test]
fn test_search_without_upload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = session_in(dir.path());
    session.login("x", &Credential::from_secret("x")).unwrap();

    let err = session.search("44051401458").unwrap_err();
    assert!(matches!(err, SearchError::MissingInput(_)));
    assert!(!dir.path().join("query_logs.csv").exists());
}

/// All identifiers rejected: no pipeline run, no audit entry
#[test]
fn test_all_identifiers_invalid() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = session_in(dir.path());
    session.login("x", &Credential::from_secret("x")).unwrap();
    session.upload("PSZL.xlsx", b"not parsed".to_vec());

    let outcome = session.search("1234\n44051401459").unwrap();
    assert!(matches!(outcome, SearchOutcome::NoValidIdentifiers { .. }));
    assert!(!dir.path().join("query_logs.csv").exists());
}

/// Audit write failure does not discard results
#[test]
fn test_audit_failure_keeps_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Ubezpieczony").unwrap();
    worksheet.write_string(1, 0, "Jan 44051401458").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    // parent directory does not exist, so the append fails
    let mut session = Session::new(
        MatchOptions::default(),
        AuditLog::new(dir.path().join("missing").join("query_logs.csv")),
        10,
    );
    session.login("x", &Credential::from_secret("x")).unwrap();
    session.upload("PSZL.xlsx", bytes);

    match session.search("44051401458").unwrap() {
        SearchOutcome::Completed(summary) => {
            assert_eq!(summary.match_count, 1);
            assert!(summary.audit_warning.is_some());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(session.results().unwrap().len(), 1);
}

/// Wrong password
#[test]
fn test_unauthorized() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = session_in(dir.path());
    let err = session.login("zle", &Credential::from_secret("dobre")).unwrap_err();
    assert!(matches!(err, SearchError::Unauthorized));
}

/// SearchError Display
#[test]
fn test_error_display() {
    let errors = vec![
        SearchError::Config("test".to_string()),
        SearchError::MissingCredential,
        SearchError::Unauthorized,
        SearchError::MissingInput("prześlij plik".to_string()),
        SearchError::Parse("zip".to_string()),
        SearchError::NoResults,
        SearchError::FileNotFound("PSZL.xlsx".to_string()),
        SearchError::Prompt("tty".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Display empty: {:?}", err);
    }
}

/// Conversions from io and core errors
#[test]
fn test_error_from_conversions() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "brak");
    let error: SearchError = io_error.into();
    assert!(matches!(error, SearchError::Io(_)));

    let core = pszl_common::Error::Export("x".to_string());
    let error: SearchError = core.into();
    assert!(matches!(error, SearchError::Export(_)));
    assert!(format!("{}", error).contains("Błąd eksportu"));
}
