//! Tests for the append-mode CSV sink

use crate::app::services::csv_emitter::writer::append_rows;

fn headers() -> Vec<String> {
    vec!["a".to_string(), "b".to_string()]
}

fn row(first: &str, second: &str) -> Vec<String> {
    vec![first.to_string(), second.to_string()]
}

#[test]
fn new_sink_gets_header_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let written = append_rows(&path, &headers(), &[row("1", "2")]).unwrap();
    assert_eq!(written, 1);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["a,b", "1,2"]);
}

#[test]
fn existing_sink_appends_without_repeating_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    append_rows(&path, &headers(), &[row("1", "2")]).unwrap();
    append_rows(&path, &headers(), &[row("3", "4"), row("5", "6")]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["a,b", "1,2", "3,4", "5,6"]);
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("out.csv");

    append_rows(&path, &headers(), &[row("1", "2")]).unwrap();
    assert!(path.exists());
}

#[test]
fn zero_rows_still_create_the_sink_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let written = append_rows(&path, &headers(), &[]).unwrap();
    assert_eq!(written, 0);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["a,b"]);
}

#[test]
fn fields_with_commas_are_quoted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    append_rows(&path, &headers(), &[row("x,y", "z")]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"x,y\",z"));
}
