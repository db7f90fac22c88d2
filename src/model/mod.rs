//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod line;

// Re-export for convenience
pub use error::{AppError, TransportError};
pub use line::{LineIndex, LogBuffer, LogEntry, LogLine, TerminalStatus};
