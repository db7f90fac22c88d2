//! Stdin-backed log stream transport.
//!
//! Feeds piped input (`tail -f build.log | tailview`) through the same
//! transport seam a real streaming RPC client would use. A background reader
//! thread turns each input line into a batch and sends it down the stream
//! channel; EOF (or a read error) becomes the one-shot terminal status.
//!
//! # Input format
//!
//! Lines that parse as JSON objects with a `text` field are structured
//! entries; their `timestamp` field is used when present. Anything else is
//! treated as plain text. Entries without a usable timestamp get the receive
//! time substituted (best-effort, with a warning) rather than failing the
//! batch.

use crate::model::{LogEntry, TerminalStatus, TransportError};
use crate::transport::{CallMetadata, LogStreamClient, StreamEvent, StreamHandle, StreamRequest};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::{BufRead, BufReader, IsTerminal};
use std::thread;
use tracing::{debug, warn};

/// Detail text of the terminal status emitted when the pipe reaches EOF.
pub const EOF_STATUS_DETAIL: &str = "stream closed: EOF";

/// A structured input line, as accepted on the wire.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    text: String,
}

/// Transport client that streams log entries from stdin.
///
/// Refuses to open when stdin is an interactive terminal, so the TUI never
/// blocks waiting for a pipe that was not connected.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinLogStream;

impl StdinLogStream {
    /// Create the stdin transport.
    pub fn new() -> Self {
        Self
    }
}

impl LogStreamClient for StdinLogStream {
    fn open_log_stream(
        &self,
        request: &StreamRequest,
        metadata: CallMetadata,
    ) -> Result<StreamHandle, TransportError> {
        if std::io::stdin().is_terminal() {
            return Err(TransportError::NoInput);
        }

        debug!(
            target = request.target(),
            metadata_entries = metadata.len(),
            "opening stdin log stream"
        );

        Ok(spawn_reader_stream(BufReader::new(std::io::stdin())))
    }
}

/// Spawn a reader thread that streams `reader`'s lines as batch events.
///
/// Used by [`StdinLogStream`] with stdin, and directly by tests with
/// in-memory readers. The thread exits after sending the terminal status.
pub fn spawn_reader_stream<R>(reader: R) -> StreamHandle
where
    R: BufRead + Send + 'static,
{
    let (tx, handle) = StreamHandle::channel();

    thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if line.is_empty() {
                        continue;
                    }
                    let entry = parse_line(&line, Utc::now());
                    // Receiver gone means the viewer shut down; stop reading.
                    if tx.send(StreamEvent::Batch(vec![entry])).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    let status = TerminalStatus::new(format!("stream closed: {}", err));
                    let _ = tx.send(StreamEvent::Status(status));
                    return;
                }
            }
        }

        let _ = tx.send(StreamEvent::Status(TerminalStatus::new(EOF_STATUS_DETAIL)));
    });

    handle
}

/// Parse one input line into a log entry.
///
/// `received_at` is substituted when the line carries no usable timestamp:
/// silently for plain text lines (which never carry one), with a warning for
/// structured entries that omit the field.
fn parse_line(line: &str, received_at: DateTime<Utc>) -> LogEntry {
    match serde_json::from_str::<RawEntry>(line) {
        Ok(raw) => {
            let timestamp = match raw.timestamp {
                Some(ts) => ts,
                None => {
                    warn!(text = %raw.text, "entry missing timestamp, substituting receive time");
                    received_at
                }
            };
            LogEntry::new(timestamp, raw.text)
        }
        Err(_) => LogEntry::new(received_at, line),
    }
}
