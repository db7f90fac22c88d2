//! Error types for the tailview application.
//!
//! A small hierarchical taxonomy using `thiserror`, composing via `?` and
//! `From` conversions.
//!
//! Note that stream closure is *not* an error: the transport's terminal
//! status is rendered inline as a log line and the application keeps
//! running. Only failures to open the stream, configuration problems, and
//! terminal I/O failures propagate as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// Domain-specific error types convert automatically via `From`, enabling
/// clean propagation with the `?` operator.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to open the log stream subscription.
    ///
    /// Fatal: without a stream there is nothing to display. Failures *after*
    /// a successful open arrive as a terminal status event instead and are
    /// rendered inline, never through this variant.
    #[error("Failed to open log stream: {0}")]
    Transport(#[from] TransportError),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer. Fatal: the terminal is
    /// restored and the error is written to stderr on the way out.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when opening a log stream subscription.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No input is available: stdin is an interactive terminal.
    ///
    /// Raised at open time so the TUI never sits blocked waiting for a pipe
    /// the user forgot to connect.
    #[error("No input source: pipe log data on stdin (e.g. `tail -f build.log | tailview`)")]
    NoInput,

    /// The request descriptor failed validation at construction.
    #[error("Invalid stream request: {reason}")]
    InvalidRequest {
        /// Why the request was rejected.
        reason: String,
    },

    /// I/O failure while opening the subscription.
    #[error("I/O error opening stream for {path:?}: {source}")]
    Io {
        /// Path or descriptor the open was attempted against.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
