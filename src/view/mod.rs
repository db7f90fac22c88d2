//! TUI rendering and terminal management (impure shell).

pub mod follow_indicator;
pub mod log_pane;
pub mod viewport;

pub use follow_indicator::FollowIndicator;
pub use log_pane::{content_height, max_offset, render_log_pane};
pub use viewport::Viewport;

use crate::ingest::StreamIngest;
use crate::model::TransportError;
use crate::transport::{LogStreamClient, MetadataProvider, StreamRequest};
use crate::state::FollowController;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Failure opening the log stream.
    #[error("Stream error: {0}")]
    Transport(#[from] TransportError),
}

/// Presentation options resolved from config and CLI.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Title shown on the log pane border (the stream target).
    pub title: String,
    /// How long the event loop waits for input before pumping the stream.
    pub poll_interval: Duration,
    /// Whether to start anchored to the bottom (follow mode).
    pub follow: bool,
}

/// Main TUI application.
///
/// Generic over backend to support testing with TestBackend.
pub struct TuiApp<B, C, M>
where
    B: ratatui::backend::Backend,
    C: LogStreamClient,
    M: MetadataProvider,
{
    terminal: Terminal<B>,
    ingest: StreamIngest<C, M>,
    follow: FollowController,
    viewport: Viewport,
    options: ViewOptions,
}

impl<C, M> TuiApp<CrosstermBackend<Stdout>, C, M>
where
    C: LogStreamClient,
    M: MetadataProvider,
{
    /// Create and initialize a TUI application on the real terminal.
    ///
    /// Sets up raw mode with alternate screen; [`restore_terminal`] undoes
    /// both.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::Io`] if terminal setup fails.
    pub fn new(ingest: StreamIngest<C, M>, options: ViewOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::from_terminal(terminal, ingest, options))
    }
}

impl<B, C, M> TuiApp<B, C, M>
where
    B: ratatui::backend::Backend,
    C: LogStreamClient,
    M: MetadataProvider,
{
    /// Assemble an application around an existing terminal (used by tests
    /// with TestBackend).
    pub fn from_terminal(
        terminal: Terminal<B>,
        ingest: StreamIngest<C, M>,
        options: ViewOptions,
    ) -> Self {
        Self {
            terminal,
            ingest,
            follow: FollowController::new(),
            viewport: Viewport::new(),
            options,
        }
    }

    /// Run the main event loop until the user quits.
    ///
    /// Event-driven: redraws happen on user input and when the stream pump
    /// appended lines, not on every tick.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::Io`] on terminal failures.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // First draw completes the initial layout; only then is the one-time
        // mount scroll meaningful.
        self.draw()?;
        let last = self.ingest.last_index();
        if let Some(command) = self.follow.on_mount(last) {
            let len = self.ingest.buffer().len();
            self.viewport.apply(command, len);
            self.sync_observation();
            self.draw()?;
        }
        if !self.options.follow {
            self.viewport.scroll_to_top();
            self.sync_observation();
            self.draw()?;
        }

        loop {
            if event::poll(self.options.poll_interval)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break;
                        }
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                        self.draw()?;
                    }
                    _ => {}
                }
            } else {
                let outcome = self.ingest.pump(&mut self.follow);
                let len = self.ingest.buffer().len();
                for command in &outcome.commands {
                    self.viewport.apply(*command, len);
                    self.sync_observation();
                }
                if outcome.changed() {
                    self.draw()?;
                }
            }
        }

        self.follow.detach();
        Ok(())
    }

    /// Handle a single keyboard event. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let len = self.ingest.buffer().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.viewport.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.viewport.scroll_down(1, len),
            KeyCode::PageUp => self.viewport.page_up(),
            KeyCode::PageDown => self.viewport.page_down(len),
            KeyCode::Home | KeyCode::Char('g') => self.viewport.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => {
                // Resume follow: jump back to the bottom; the resulting
                // observation flips the controller to Following.
                if let Some(command) = self.follow.resume() {
                    self.viewport.apply(command, len);
                }
            }
            _ => return false,
        }

        self.sync_observation();
        false
    }

    /// Report the viewport's position to the follow controller.
    fn sync_observation(&mut self) {
        let observation = self.viewport.observation(self.ingest.buffer().len());
        self.follow.observe_scroll(observation);
    }

    /// Draw the log pane and status bar, then re-report the (possibly
    /// clamped) viewport position.
    fn draw(&mut self) -> Result<(), TuiError> {
        let Self {
            terminal,
            ingest,
            follow,
            viewport,
            options,
        } = self;

        let buffer = ingest.buffer();
        let closed = ingest.is_closed();
        terminal.draw(|frame| {
            let chunks =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(frame.area());

            viewport.resize(content_height(chunks[0]), buffer.len());
            if follow.is_following() {
                // Stay pinned to the newest line across resizes.
                viewport.scroll_to_bottom(buffer.len());
            }

            render_log_pane(frame, chunks[0], buffer, viewport.offset(), &options.title);

            let indicator = FollowIndicator::new(follow.state(), follow.unread_count());
            let mut spans = vec![indicator.render(), Span::raw(format!("{} lines", buffer.len()))];
            if closed {
                spans.push(Span::raw(" · stream closed"));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
        })?;

        // Layout may have clamped the offset (e.g. on resize); keep the
        // controller's view of the position current.
        self.sync_observation();
        Ok(())
    }
}

/// Restore the terminal to its pre-TUI state.
///
/// # Errors
///
/// Returns [`TuiError::Io`] if raw mode or the alternate screen cannot be
/// torn down.
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Open the stream and run the TUI on the real terminal.
///
/// Terminal state is restored even when the run fails.
///
/// # Errors
///
/// Returns [`TuiError::Transport`] if the stream cannot be opened and
/// [`TuiError::Io`] on terminal failures.
pub fn run_stream<C, M>(
    client: C,
    metadata: M,
    request: &StreamRequest,
    options: ViewOptions,
) -> Result<(), TuiError>
where
    C: LogStreamClient,
    M: MetadataProvider,
{
    let mut ingest = StreamIngest::new(client, metadata);
    ingest.start(request)?;

    let mut app = TuiApp::new(ingest, options)?;
    let result = app.run();

    restore_terminal()?;

    result
}
