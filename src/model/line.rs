//! Log line types: raw entries, formatted display lines, and the append-only buffer.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;

/// A raw log entry as delivered by the transport.
///
/// Entries arrive grouped in batches; ordering within and across batches is
/// guaranteed by the transport and preserved all the way into [`LogBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogEntry {
    /// When the entry was produced at the source.
    pub timestamp: DateTime<Utc>,
    /// The raw log text, without any timestamp prefix.
    pub text: String,
}

impl LogEntry {
    /// Create a new entry from a timestamp and raw text.
    pub fn new(timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }
}

/// The terminal event signaling stream closure.
///
/// Carries the human-readable detail message from the transport. Exactly
/// zero or one of these is delivered per stream, always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalStatus {
    /// Human-readable closure detail (e.g. "stream closed: EOF").
    pub detail: String,
}

impl TerminalStatus {
    /// Create a terminal status with the given detail text.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// An immutable, formatted display line.
///
/// Regular entries render as an RFC3339 timestamp prefix, `": "`, then the
/// raw text (e.g. `2024-01-02T03:04:05Z: starting build`). Terminal status
/// lines carry the detail text verbatim with no prefix. Never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine(String);

impl LogLine {
    /// Wrap already-formatted text as a display line (used for terminal
    /// status details, which carry no timestamp prefix).
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Format a raw entry into its display line.
    ///
    /// The timestamp renders as RFC3339 with whole-second precision and a
    /// `Z` suffix, matching the reference format and staying lexically
    /// sortable.
    pub fn from_entry(entry: &LogEntry) -> Self {
        let prefix = entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        Self(format!("{}: {}", prefix, entry.text))
    }

    /// The formatted line text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zero-based index of a line within a [`LogBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineIndex(usize);

impl LineIndex {
    /// Wrap a raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index value.
    pub fn get(&self) -> usize {
        self.0
    }
}

/// Ordered, append-only sequence of display lines.
///
/// Insertion order equals arrival order; lines are never removed or reordered
/// for the lifetime of the component. Growth is unbounded (eviction is out of
/// scope for this crate).
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: Vec<LogLine>,
}

impl LogBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, returning its index.
    ///
    /// The only mutating operation the buffer exposes.
    pub fn push(&mut self, line: LogLine) -> LineIndex {
        let index = LineIndex::new(self.lines.len());
        self.lines.push(line);
        index
    }

    /// All lines, oldest first.
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Line at the given index, if in range.
    pub fn get(&self, index: LineIndex) -> Option<&LogLine> {
        self.lines.get(index.get())
    }

    /// Number of lines in the buffer.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no lines have been appended yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the newest line, or `None` for an empty buffer.
    pub fn last_index(&self) -> Option<LineIndex> {
        self.lines.len().checked_sub(1).map(LineIndex::new)
    }
}
