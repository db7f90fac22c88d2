//! Viewport scroll model: offset bookkeeping for the log pane.
//!
//! Owns the current scroll offset and viewport height, clamps every move to
//! the valid range, applies scroll commands from the follow controller, and
//! produces the `{current, max}` observations that drive it.

use crate::model::LineIndex;
use crate::state::{ScrollCommand, ScrollObservation};
use crate::view::log_pane::max_offset;

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;

/// Scroll state of the log pane.
#[derive(Debug, Default)]
pub struct Viewport {
    offset: usize,
    height: usize,
}

impl Viewport {
    /// Viewport at the top with no known height yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scroll offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Content rows currently visible.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Record the laid-out height and clamp the offset for `len` lines.
    pub fn resize(&mut self, height: usize, len: usize) {
        self.height = height;
        self.offset = self.offset.min(max_offset(len, height));
    }

    /// Scroll up by `n` lines.
    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    /// Scroll down by `n` lines, clamped to the bottom.
    pub fn scroll_down(&mut self, n: usize, len: usize) {
        self.offset = self
            .offset
            .saturating_add(n)
            .min(max_offset(len, self.height));
    }

    /// Scroll up by one viewport height.
    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    /// Scroll down by one viewport height.
    pub fn page_down(&mut self, len: usize) {
        self.scroll_down(self.height.max(1), len);
    }

    /// Jump to the very top.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Jump to the very bottom.
    pub fn scroll_to_bottom(&mut self, len: usize) {
        self.offset = max_offset(len, self.height);
    }

    /// Move the minimum amount needed to bring `line` into view.
    pub fn ensure_visible(&mut self, line: LineIndex, len: usize) {
        let index = line.get();
        if index < self.offset {
            self.offset = index;
        } else if self.height > 0 && index >= self.offset + self.height {
            self.offset = index + 1 - self.height;
        }
        self.offset = self.offset.min(max_offset(len, self.height));
    }

    /// Apply a scroll command from the follow controller.
    pub fn apply(&mut self, command: ScrollCommand, len: usize) {
        match command {
            ScrollCommand::IntoView(line) => self.ensure_visible(line, len),
            ScrollCommand::ToBottom => self.scroll_to_bottom(len),
        }
    }

    /// The observation the rendering surface reports after any move.
    pub fn observation(&self, len: usize) -> ScrollObservation {
        ScrollObservation::new(self.offset, max_offset(len, self.height))
    }
}
