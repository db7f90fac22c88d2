//! Property-based tests for the line buffer and follow controller.
//!
//! Verified properties:
//! - Buffer order equals delivery order, entry-by-entry across batches.
//! - A positive unread count implies the Paused state, at every step.
//! - Returning to the bottom always resets the unread count to zero.
//! - Unread accumulates by exactly one per line appended while Paused.
//! - An auto-scroll command is emitted on append iff Following.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use tailview::ingest::StreamIngest;
use tailview::model::{LineIndex, LogEntry, LogLine, TransportError};
use tailview::state::{FollowController, FollowState, ScrollObservation};
use tailview::transport::{
    CallMetadata, LogStreamClient, MetadataProvider, StreamEvent, StreamHandle, StreamRequest,
};

// ===== Transport test double =====

/// Client whose opened stream is fed directly by the test.
#[derive(Clone)]
struct ChannelClient {
    sender_slot: Arc<Mutex<Option<Sender<StreamEvent>>>>,
}

impl ChannelClient {
    fn new() -> Self {
        Self {
            sender_slot: Arc::new(Mutex::new(None)),
        }
    }

    fn sender(&self) -> Sender<StreamEvent> {
        self.sender_slot
            .lock()
            .unwrap()
            .clone()
            .expect("stream not opened yet")
    }
}

impl LogStreamClient for ChannelClient {
    fn open_log_stream(
        &self,
        _request: &StreamRequest,
        _metadata: CallMetadata,
    ) -> Result<StreamHandle, TransportError> {
        let (tx, handle) = StreamHandle::channel();
        *self.sender_slot.lock().unwrap() = Some(tx);
        Ok(handle)
    }
}

struct NoMetadata;

impl MetadataProvider for NoMetadata {
    fn call_metadata(&self) -> CallMetadata {
        CallMetadata::new()
    }
}

fn started_ingest() -> (StreamIngest<ChannelClient, NoMetadata>, Sender<StreamEvent>) {
    let client = ChannelClient::new();
    let sender_source = client.clone();
    let mut ingest = StreamIngest::new(client, NoMetadata);
    ingest
        .start(&StreamRequest::new("prop-test").unwrap())
        .unwrap();
    let tx = sender_source.sender();
    (ingest, tx)
}

// ===== Strategies =====

fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn arb_entry() -> impl Strategy<Value = LogEntry> {
    (arb_timestamp(), "[ -~]{0,30}").prop_map(|(ts, text)| LogEntry::new(ts, text))
}

fn arb_batches() -> impl Strategy<Value = Vec<Vec<LogEntry>>> {
    prop::collection::vec(prop::collection::vec(arb_entry(), 0..6), 0..8)
}

/// One step driving the follow controller.
#[derive(Debug, Clone)]
enum Step {
    Observe { current: usize, max: usize },
    Append,
}

fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        prop_oneof![
            (0usize..30, 0usize..30).prop_map(|(current, max)| Step::Observe { current, max }),
            Just(Step::Append),
        ],
        0..60,
    )
}

// ===== Ordering =====

proptest! {
    #[test]
    fn buffer_order_equals_delivery_order(batches in arb_batches()) {
        let (mut ingest, tx) = started_ingest();
        let mut follow = FollowController::new();

        for batch in &batches {
            tx.send(StreamEvent::Batch(batch.clone())).unwrap();
        }
        ingest.pump(&mut follow);

        let expected: Vec<String> = batches
            .iter()
            .flatten()
            .map(|entry| LogLine::from_entry(entry).as_str().to_string())
            .collect();
        let actual: Vec<String> = ingest
            .buffer()
            .lines()
            .iter()
            .map(|line| line.as_str().to_string())
            .collect();

        prop_assert_eq!(actual, expected);
    }
}

// ===== Unread invariant and command emission =====

proptest! {
    #[test]
    fn unread_positive_implies_paused_at_every_step(steps in arb_steps()) {
        let mut follow = FollowController::new();
        let mut next_line = 0usize;

        for step in steps {
            match step {
                Step::Observe { current, max } => {
                    follow.observe_scroll(ScrollObservation::new(current, max));
                }
                Step::Append => {
                    let was_following = follow.is_following();
                    let command = follow.on_line_added(LineIndex::new(next_line));
                    next_line += 1;

                    // A command is emitted iff Following at event time.
                    prop_assert_eq!(command.is_some(), was_following);
                }
            }

            // The invariant holds at every observable point.
            if follow.unread_count() > 0 {
                prop_assert_eq!(follow.state(), FollowState::Paused);
            }
        }
    }
}

// ===== Reset on returning to the bottom =====

proptest! {
    #[test]
    fn scroll_to_bottom_always_resets_unread(steps in arb_steps(), max in 1usize..40) {
        let mut follow = FollowController::new();
        let mut next_line = 0usize;

        for step in steps {
            match step {
                Step::Observe { current, max } => {
                    follow.observe_scroll(ScrollObservation::new(current, max));
                }
                Step::Append => {
                    follow.on_line_added(LineIndex::new(next_line));
                    next_line += 1;
                }
            }
        }

        follow.observe_scroll(ScrollObservation::new(max, max));
        prop_assert!(follow.is_following());
        prop_assert_eq!(follow.unread_count(), 0);
    }
}

// ===== Pause accumulation =====

proptest! {
    #[test]
    fn paused_appends_accumulate_exactly(k in 0usize..20, n in 0usize..20) {
        let mut follow = FollowController::new();
        follow.observe_scroll(ScrollObservation::new(0, 10));

        for i in 0..k {
            follow.on_line_added(LineIndex::new(i));
        }
        prop_assert_eq!(follow.unread_count(), k);

        for i in k..k + n {
            follow.on_line_added(LineIndex::new(i));
        }
        prop_assert_eq!(follow.unread_count(), k + n);
    }
}
