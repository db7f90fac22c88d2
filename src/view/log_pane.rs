//! Log pane rendering: the visible window of the line buffer.

use crate::model::LogBuffer;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[cfg(test)]
#[path = "log_pane_tests.rs"]
mod tests;

/// Maximum scroll offset for a buffer of `len` lines in a viewport showing
/// `viewport_height` lines at once.
///
/// Zero when everything fits; "at bottom" means the offset equals this.
pub fn max_offset(len: usize, viewport_height: usize) -> usize {
    len.saturating_sub(viewport_height)
}

/// Viewport height (content rows) for a pane drawn in `area`.
///
/// Two rows go to the border.
pub fn content_height(area: Rect) -> usize {
    (area.height as usize).saturating_sub(2)
}

/// Render the log pane: the slice of `buffer` starting at `offset`, inside
/// a bordered block titled with the stream target.
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    buffer: &LogBuffer,
    offset: usize,
    title: &str,
) {
    let height = content_height(area);
    let start = offset.min(max_offset(buffer.len(), height));
    let end = (start + height).min(buffer.len());

    let lines: Vec<Line> = buffer.lines()[start..end]
        .iter()
        .map(|line| Line::raw(line.as_str().to_string()))
        .collect();

    let pane = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(pane, area);
}
