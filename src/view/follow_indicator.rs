//! Follow indicator widget for the status bar.
//!
//! Shows whether the viewport is anchored to the newest line, and how many
//! lines arrived while it was not.

use crate::state::FollowState;
use ratatui::{
    style::{Color, Style},
    text::Span,
};

#[cfg(test)]
#[path = "follow_indicator_tests.rs"]
mod tests;

/// Status-bar widget rendering the follow state and unread badge.
///
/// Pure and stateless: follow state and unread count are passed in, the
/// widget only styles them.
///
/// - Following: green `[FOLLOW]`
/// - Paused with nothing unread: gray `[PAUSED]`
/// - Paused with unread lines: yellow `[PAUSED +N]`
#[derive(Debug, Clone, Copy)]
pub struct FollowIndicator {
    state: FollowState,
    unread: usize,
}

impl FollowIndicator {
    /// Create an indicator for the given state and unread count.
    pub fn new(state: FollowState, unread: usize) -> Self {
        Self { state, unread }
    }

    /// Render the indicator as a ratatui span.
    pub fn render(&self) -> Span<'static> {
        match self.state {
            FollowState::Following => {
                Span::styled("[FOLLOW] ", Style::default().fg(Color::Green))
            }
            FollowState::Paused if self.unread == 0 => {
                Span::styled("[PAUSED] ", Style::default().fg(Color::Gray))
            }
            FollowState::Paused => Span::styled(
                format!("[PAUSED +{}] ", self.unread),
                Style::default().fg(Color::Yellow),
            ),
        }
    }
}
