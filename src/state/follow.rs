//! Follow controller: a two-state machine driven by scroll observations and
//! line-append events.
//!
//! While the viewer is anchored to the bottom of the viewport, every new
//! line triggers an auto-scroll command. Once the viewer scrolls away, new
//! lines are silently buffered and an unread counter accumulates until the
//! viewer returns to the bottom.
//!
//! Invariant: an unread count greater than zero implies the Paused state.
//! The count resets to exactly zero on every transition to Following.

use crate::model::LineIndex;

#[cfg(test)]
#[path = "follow_tests.rs"]
mod tests;

/// Whether the viewer is anchored to the newest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// Anchored to the bottom; new lines auto-scroll into view.
    Following,
    /// Scrolled away; new lines accumulate with an unread count.
    Paused,
}

/// A scroll instruction for the rendering surface.
///
/// The controller emits commands; it never touches the viewport itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Bring the given buffer line into view.
    IntoView(LineIndex),
    /// Jump the viewport to the very bottom.
    ToBottom,
}

/// A scroll-position observation reported by the rendering surface.
///
/// `current` is the viewport's scroll offset, `max` its maximum offset.
/// "At bottom" is exact equality; with integer line offsets there is no
/// sub-pixel fuzz to tolerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollObservation {
    /// Current scroll offset.
    pub current: usize,
    /// Maximum scroll offset for the current content and viewport.
    pub max: usize,
}

impl ScrollObservation {
    /// Build an observation from current and maximum offsets.
    pub fn new(current: usize, max: usize) -> Self {
        Self { current, max }
    }

    /// True when the viewport is anchored to the bottom.
    pub fn at_bottom(&self) -> bool {
        self.current == self.max
    }
}

/// Owns the follow state and unread count; mediates between scroll
/// observations and auto-scroll/badge behavior.
///
/// Single-writer: every method runs to completion on the hosting event loop
/// before the next event is observed, so no interior locking is needed.
#[derive(Debug)]
pub struct FollowController {
    state: FollowState,
    unread: usize,
    /// One-shot latch for the initial mount scroll.
    mounted: bool,
    /// Teardown guard: once detached, every event is a no-op.
    detached: bool,
}

impl Default for FollowController {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowController {
    /// Create a controller in the Following state with no unread lines.
    pub fn new() -> Self {
        Self {
            state: FollowState::Following,
            unread: 0,
            mounted: false,
            detached: false,
        }
    }

    /// Current follow state.
    pub fn state(&self) -> FollowState {
        self.state
    }

    /// True while anchored to the bottom.
    pub fn is_following(&self) -> bool {
        self.state == FollowState::Following
    }

    /// Lines received since the viewer scrolled away.
    ///
    /// Meaningful only while Paused; always zero while Following.
    pub fn unread_count(&self) -> usize {
        self.unread
    }

    /// Apply a scroll-position observation from the rendering surface.
    ///
    /// At-bottom transitions to Following and clears the unread count;
    /// anything else transitions to Paused, leaving the count untouched.
    pub fn observe_scroll(&mut self, observation: ScrollObservation) {
        if self.detached {
            return;
        }
        if observation.at_bottom() {
            self.state = FollowState::Following;
            self.unread = 0;
        } else {
            self.state = FollowState::Paused;
        }
    }

    /// React to a line appended to the buffer.
    ///
    /// While Following, emits a command scrolling the new line into view
    /// (and keeps the unread count at zero). While Paused, increments the
    /// unread count and emits nothing.
    pub fn on_line_added(&mut self, line: LineIndex) -> Option<ScrollCommand> {
        if self.detached {
            return None;
        }
        match self.state {
            FollowState::Following => {
                self.unread = 0;
                Some(ScrollCommand::IntoView(line))
            }
            FollowState::Paused => {
                self.unread += 1;
                None
            }
        }
    }

    /// Emit the one-time initial scroll command after the first layout.
    ///
    /// The rendering surface calls this once its first layout is complete
    /// (rather than the controller guessing with a fixed delay). Repeated
    /// calls and calls after [`detach`](Self::detach) return `None`, as does
    /// a mount over an empty buffer.
    pub fn on_mount(&mut self, last_line: Option<LineIndex>) -> Option<ScrollCommand> {
        if self.detached || self.mounted {
            return None;
        }
        self.mounted = true;
        last_line.map(ScrollCommand::IntoView)
    }

    /// Request a jump back to the bottom of the buffer.
    ///
    /// The state change itself happens when the viewport reports the
    /// resulting at-bottom observation, keeping the observation path the
    /// single source of state transitions.
    pub fn resume(&self) -> Option<ScrollCommand> {
        if self.detached {
            return None;
        }
        Some(ScrollCommand::ToBottom)
    }

    /// Tear down: all further events become no-ops.
    ///
    /// Guards against late mount or append events acting on a viewport that
    /// no longer exists.
    pub fn detach(&mut self) {
        self.detached = true;
    }
}
