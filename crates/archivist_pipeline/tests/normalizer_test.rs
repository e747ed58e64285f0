//! Tests for identifier normalization.

use archivist_pipeline::{load_identifier_file, normalize_file, normalize_text};
use std::io::Write;

#[test]
fn test_first_spelling_wins_under_case_folding() {
    let batch = normalize_text("SCP-173\nscp-173\nSCP-049").unwrap();
    assert_eq!(batch.requested(), vec!["SCP-173", "SCP-049"]);
    assert_eq!(batch.canonical_names(), vec!["SCP-173", "SCP-049"]);

    let batch = normalize_text("scp-096, SCP-096").unwrap();
    assert_eq!(batch.requested(), vec!["scp-096"]);
    assert_eq!(batch.canonical_names(), vec!["SCP-096"]);
}

#[test]
fn test_mixed_separators_and_whitespace() {
    let batch = normalize_text(" SCP-173 ,, \r\n\n  SCP-682,SCP-999 \n").unwrap();
    assert_eq!(batch.requested(), vec!["SCP-173", "SCP-682", "SCP-999"]);
    assert_eq!(batch.len(), 3);
}

#[test]
fn test_inner_spaces_do_not_split() {
    let batch = normalize_text("SCP-173 SCP-049").unwrap();
    assert_eq!(batch.requested(), vec!["SCP-173 SCP-049"]);
}

#[test]
fn test_empty_text_is_validation_message() {
    let err = normalize_text(" ,\n , ").unwrap_err();
    assert_eq!(err.user_message(), "Please enter at least one SCP designation.");
}

#[test]
fn test_file_lines_keep_commas() {
    let batch = normalize_file("SCP-173\r\nSCP-049, Plague Doctor\n\nscp-173\n").unwrap();
    assert_eq!(batch.requested(), vec!["SCP-173", "SCP-049, Plague Doctor"]);
}

#[test]
fn test_empty_file_is_validation_message() {
    let err = normalize_file("\n\n   \n").unwrap_err();
    assert_eq!(err.user_message(), "The imported CSV file is empty or invalid.");
}

#[test]
fn test_load_identifier_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "SCP-173\nSCP-3008").unwrap();

    let batch = load_identifier_file(file.path()).unwrap();
    let requested: Vec<&str> = batch.iter().map(|id| id.requested().as_str()).collect();
    assert_eq!(requested, vec!["SCP-173", "SCP-3008"]);
}

#[test]
fn test_unreadable_file_is_validation_message() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_identifier_file(dir.path().join("missing.csv")).unwrap_err();
    assert_eq!(err.user_message(), "Failed to read the imported file.");
}
