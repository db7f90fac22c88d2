//! Tests for log line formatting and the append-only buffer.

use super::*;
use chrono::TimeZone;

fn ts(secs: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, secs).unwrap()
}

// ===== LogLine formatting =====

#[test]
fn from_entry_prefixes_rfc3339_timestamp() {
    let entry = LogEntry::new(ts(5), "starting build");
    let line = LogLine::from_entry(&entry);
    assert_eq!(line.as_str(), "2024-01-02T03:04:05Z: starting build");
}

#[test]
fn from_entry_preserves_empty_text() {
    let entry = LogEntry::new(ts(5), "");
    let line = LogLine::from_entry(&entry);
    assert_eq!(line.as_str(), "2024-01-02T03:04:05Z: ");
}

#[test]
fn from_entry_uses_utc_z_suffix() {
    let entry = LogEntry::new(ts(0), "x");
    assert!(
        line_text(&entry).ends_with("Z: x"),
        "timestamp should render with Z suffix, got: {}",
        line_text(&entry)
    );
}

fn line_text(entry: &LogEntry) -> String {
    LogLine::from_entry(entry).as_str().to_string()
}

#[test]
fn raw_line_has_no_timestamp_prefix() {
    let line = LogLine::raw("stream closed: EOF");
    assert_eq!(line.as_str(), "stream closed: EOF");
}

#[test]
fn display_matches_as_str() {
    let line = LogLine::raw("hello");
    assert_eq!(format!("{}", line), line.as_str());
}

// ===== LogBuffer =====

#[test]
fn new_buffer_is_empty() {
    let buffer = LogBuffer::new();
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.last_index(), None);
}

#[test]
fn push_returns_sequential_indices() {
    let mut buffer = LogBuffer::new();
    assert_eq!(buffer.push(LogLine::raw("a")), LineIndex::new(0));
    assert_eq!(buffer.push(LogLine::raw("b")), LineIndex::new(1));
    assert_eq!(buffer.push(LogLine::raw("c")), LineIndex::new(2));
}

#[test]
fn push_preserves_insertion_order() {
    let mut buffer = LogBuffer::new();
    for text in ["first", "second", "third"] {
        buffer.push(LogLine::raw(text));
    }

    let lines: Vec<&str> = buffer.lines().iter().map(LogLine::as_str).collect();
    assert_eq!(lines, vec!["first", "second", "third"]);
}

#[test]
fn last_index_tracks_newest_line() {
    let mut buffer = LogBuffer::new();
    buffer.push(LogLine::raw("a"));
    assert_eq!(buffer.last_index(), Some(LineIndex::new(0)));
    buffer.push(LogLine::raw("b"));
    assert_eq!(buffer.last_index(), Some(LineIndex::new(1)));
}

#[test]
fn get_returns_line_in_range_and_none_beyond() {
    let mut buffer = LogBuffer::new();
    let index = buffer.push(LogLine::raw("only"));

    assert_eq!(buffer.get(index).map(LogLine::as_str), Some("only"));
    assert_eq!(buffer.get(LineIndex::new(1)), None);
}
