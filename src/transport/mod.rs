//! Log stream transport seam.
//!
//! Defines the collaborator interfaces the core consumes: a client that
//! opens a subscription, a provider of opaque call metadata, and the typed
//! event stream delivered through a single-consumer channel. The channel
//! preserves arrival order, so ingest sees batches exactly as the transport
//! emitted them.
//!
//! A concrete stdin-backed transport lives in [`stdin`].

use crate::model::{LogEntry, TerminalStatus, TransportError};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

pub mod stdin;

pub use stdin::StdinLogStream;

/// A typed event delivered by an open log stream.
///
/// The transport guarantees ordering: batches arrive in emission order, and
/// at most one `Status` is delivered, always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A group of log entries delivered together, in order.
    Batch(Vec<LogEntry>),
    /// The one-shot terminal event: the stream has closed.
    Status(TerminalStatus),
}

/// Describes the log stream to subscribe to.
///
/// Statically typed and validated at construction, rather than an untyped
/// argument bag resolved at subscription time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    target: String,
}

impl StreamRequest {
    /// Create a request for the named target (deployment, task, pipe label).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] if the target is empty or
    /// whitespace-only.
    pub fn new(target: impl Into<String>) -> Result<Self, TransportError> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(TransportError::InvalidRequest {
                reason: "target must not be empty".to_string(),
            });
        }
        Ok(Self { target })
    }

    /// The target this request subscribes to.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Opaque call metadata attached when opening a stream (e.g. auth headers).
///
/// The core never inspects the contents; transports forward them as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallMetadata {
    entries: Vec<(String, String)>,
}

impl CallMetadata {
    /// Empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a key/value pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// All attached pairs, in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of attached pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no pairs are attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Supplies call metadata for stream opens.
///
/// Injected explicitly at construction; the core never looks a provider up
/// from any global registry.
pub trait MetadataProvider {
    /// Metadata to attach to the next open call.
    fn call_metadata(&self) -> CallMetadata;
}

/// Fixed metadata decided at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    metadata: CallMetadata,
}

impl StaticMetadata {
    /// Wrap a fixed set of metadata entries.
    pub fn new(metadata: CallMetadata) -> Self {
        Self { metadata }
    }
}

impl MetadataProvider for StaticMetadata {
    fn call_metadata(&self) -> CallMetadata {
        self.metadata.clone()
    }
}

/// Capability representing a live subscription.
///
/// Wraps the receiving half of a single-consumer channel of
/// [`StreamEvent`]s. Events are drained non-blockingly so the hosting event
/// loop keeps its run-to-completion semantics: each event is fully applied
/// before the next is observed.
#[derive(Debug)]
pub struct StreamHandle {
    rx: Receiver<StreamEvent>,
}

impl StreamHandle {
    /// Build a connected (sender, handle) pair.
    ///
    /// Transports keep the sender; the core keeps the handle.
    pub fn channel() -> (Sender<StreamEvent>, StreamHandle) {
        let (tx, rx) = std::sync::mpsc::channel();
        (tx, StreamHandle { rx })
    }

    /// Take the next event if one is ready.
    ///
    /// Returns `None` both when no event is currently queued and when the
    /// sending side has hung up; the terminal `Status` event is the signal
    /// callers should act on, not channel disconnection.
    pub fn try_next(&self) -> Option<StreamEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Transport client capable of opening log stream subscriptions.
///
/// The returned handle emits `Batch` events and exactly zero-or-one
/// `Status` event before closing. Opening must not block: delivery is
/// asynchronous and the caller drains the handle from its own loop.
/// Reconnection and retry are the transport's concern, not the core's.
pub trait LogStreamClient {
    /// Open a subscription for `request` with `metadata` attached.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the subscription cannot be established.
    fn open_log_stream(
        &self,
        request: &StreamRequest,
        metadata: CallMetadata,
    ) -> Result<StreamHandle, TransportError>;
}
