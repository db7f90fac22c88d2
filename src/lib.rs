//! tailview
//!
//! TUI for following live log streams. The core is an append-only line
//! buffer fed by a streaming transport plus a two-state follow controller:
//! while the viewer sits at the bottom every new line auto-scrolls into
//! view; once the viewer scrolls away, new lines accumulate behind an
//! unread badge until the viewer returns.
//!
//! Transport, metadata, and the rendering surface are seams: the core only
//! sees the interfaces in [`transport`] and emits scroll commands for the
//! view to apply.

pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod state;
pub mod transport;
pub mod view;
