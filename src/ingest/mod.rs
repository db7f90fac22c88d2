//! Stream ingest: consumes a log stream and populates the line buffer.
//!
//! Sits between the transport seam and the follow controller. Batches are
//! applied entry-by-entry in arrival order; the one-shot terminal status
//! becomes a plain appended line with no timestamp prefix, after which the
//! subscription is dropped and no further batches are applied.

use crate::model::{LineIndex, LogBuffer, LogLine, TransportError};
use crate::state::{FollowController, ScrollCommand};
use crate::transport::{LogStreamClient, MetadataProvider, StreamEvent, StreamHandle, StreamRequest};
use tracing::{debug, info};

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;

/// What a [`StreamIngest::pump`] call produced.
///
/// Doubles as the change notification for the rendering surface: a non-zero
/// `appended` means the buffer grew and a redraw is due. The core itself
/// knows nothing about rendering.
#[derive(Debug, Default)]
pub struct PumpOutcome {
    /// Lines appended to the buffer during this pump.
    pub appended: usize,
    /// Scroll commands emitted by the follow controller, in order.
    pub commands: Vec<ScrollCommand>,
}

impl PumpOutcome {
    /// True when the buffer changed during this pump.
    pub fn changed(&self) -> bool {
        self.appended > 0
    }
}

/// Owns the log buffer and the live subscription.
///
/// Construction takes the transport client and metadata provider explicitly;
/// nothing is looked up from globals. Single-writer: all mutation happens on
/// the hosting event loop.
#[derive(Debug)]
pub struct StreamIngest<C, M>
where
    C: LogStreamClient,
    M: MetadataProvider,
{
    client: C,
    metadata: M,
    buffer: LogBuffer,
    handle: Option<StreamHandle>,
    closed: bool,
}

impl<C, M> StreamIngest<C, M>
where
    C: LogStreamClient,
    M: MetadataProvider,
{
    /// Create an ingest with an empty buffer and no subscription yet.
    pub fn new(client: C, metadata: M) -> Self {
        Self {
            client,
            metadata,
            buffer: LogBuffer::new(),
            handle: None,
            closed: false,
        }
    }

    /// Open the subscription for `request`.
    ///
    /// Does not block: events are delivered through the returned handle and
    /// drained by [`pump`](Self::pump) from the hosting loop. Any previous
    /// subscription is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the stream cannot be opened.
    pub fn start(&mut self, request: &StreamRequest) -> Result<(), TransportError> {
        let handle = self
            .client
            .open_log_stream(request, self.metadata.call_metadata())?;
        info!(target = request.target(), "log stream subscription opened");
        self.handle = Some(handle);
        self.closed = false;
        Ok(())
    }

    /// Drain all currently queued stream events, run-to-completion.
    ///
    /// Each batch is applied entry-by-entry in order before the next event
    /// is observed. A terminal status appends its detail text as a single
    /// line and drops the subscription; anything still queued behind it is
    /// discarded, and no resubscription is attempted.
    pub fn pump(&mut self, follow: &mut FollowController) -> PumpOutcome {
        let mut outcome = PumpOutcome::default();
        let Some(handle) = self.handle.take() else {
            return outcome;
        };

        while let Some(event) = handle.try_next() {
            match event {
                StreamEvent::Batch(entries) => {
                    debug!(entries = entries.len(), "applying log batch");
                    for entry in &entries {
                        self.append_line(LogLine::from_entry(entry), follow, &mut outcome);
                    }
                }
                StreamEvent::Status(status) => {
                    info!(detail = %status.detail, "log stream terminated");
                    self.append_line(LogLine::raw(status.detail), follow, &mut outcome);
                    self.closed = true;
                    break;
                }
            }
        }

        if !self.closed {
            self.handle = Some(handle);
        }
        outcome
    }

    /// Append one line and notify the follow controller.
    fn append_line(
        &mut self,
        line: LogLine,
        follow: &mut FollowController,
        outcome: &mut PumpOutcome,
    ) {
        let index = self.buffer.push(line);
        outcome.appended += 1;
        if let Some(command) = follow.on_line_added(index) {
            outcome.commands.push(command);
        }
    }

    /// The ordered line buffer.
    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    /// Index of the newest buffered line, if any.
    pub fn last_index(&self) -> Option<LineIndex> {
        self.buffer.last_index()
    }

    /// True once the terminal status has been received.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
