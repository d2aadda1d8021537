//! TUI rendering and the event loop.

pub mod constants;
pub mod renderer;
pub mod status;
pub mod styles;
pub mod surface;

pub use renderer::{render_row, GrepFormat, RecordFormat};
pub use status::{title_line, StatusLine};
pub use styles::{ColorConfig, RowStyles};
pub use surface::{GridSurface, Surface};

use crate::config::keybindings::KeyBindings;
use crate::editor::EditorCommand;
use crate::model::{AppError, KeyAction, SourceError};
use crate::session::Session;
use crate::source::BatchStatus;
use crate::view_state::{NavRequest, Viewport};
use constants::{CHROME_HEIGHT, FALLBACK_SIZE, STATUS_BAR_HEIGHT, TITLE_BAR_HEIGHT};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::layout::{Constraint, Layout};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tracing::{debug, info, warn};

/// What the loop does after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    OpenEditor,
    Quit,
}

/// Viewport geometry for a terminal of `width` x `height` cells.
///
/// The title bar and status line take two rows; the viewport keeps at least
/// one row and one column.
pub fn viewport_for(width: u16, height: u16) -> Viewport {
    Viewport::new(
        usize::from(height.saturating_sub(CHROME_HEIGHT)).max(1),
        usize::from(width).max(1),
    )
}

/// Viewport for the current terminal, or [`FALLBACK_SIZE`] if it cannot be
/// queried.
pub fn initial_viewport() -> Viewport {
    let (width, height) = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);
    viewport_for(width, height)
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    session: Session<GrepFormat>,
    surface: GridSurface,
    key_bindings: KeyBindings,
    status: StatusLine,
    editor: EditorCommand,
    /// Producer command, rerun on restart.
    command: String,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        session: Session<GrepFormat>,
        command: String,
        editor: EditorCommand,
    ) -> Result<Self, AppError> {
        enter_terminal().map_err(AppError::TerminalInit)?;
        let terminal =
            Terminal::new(CrosstermBackend::new(io::stdout())).map_err(AppError::TerminalInit)?;
        Self::with_terminal(terminal, session, command, editor)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Each iteration reads one batch while the
    /// producer is live, then blocks until one input event arrives.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.draw()?;

        loop {
            if self.session.is_loading() {
                self.fetch_batch();
                self.draw()?;
            }

            let Some(flow) = self.handle_event(event::read()?) else {
                continue;
            };
            match flow {
                Flow::Quit => {
                    self.session.close();
                    return Ok(());
                }
                Flow::OpenEditor => self.open_editor()?,
                Flow::Continue => {}
            }
            self.draw()?;
        }
    }

    /// Hand the terminal to the editor for the highlighted record, then take
    /// it back and repaint everything.
    fn open_editor(&mut self) -> Result<(), AppError> {
        let Some((_, record)) = self.session.selected() else {
            return Ok(());
        };
        let record = record.clone();

        self.status.info("Shelling out...");
        self.draw()?;

        leave_terminal()?;
        match self.editor.launch(&record) {
            Ok(_) => self.status.info("returned"),
            Err(err) => {
                warn!(error = %err, "editor could not be started");
                self.status.error(format!("Failed to run editor: {err}"));
            }
        }
        enter_terminal()?;

        self.terminal.clear()?;
        self.session.redraw(&mut self.surface);
        Ok(())
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(
        terminal: Terminal<B>,
        mut session: Session<GrepFormat>,
        command: String,
        editor: EditorCommand,
    ) -> Result<Self, AppError> {
        let size = terminal.size()?;
        let viewport = viewport_for(size.width, size.height);
        let mut surface = GridSurface::new(viewport.height(), viewport.width());
        session.dispatch(
            NavRequest::Resize {
                height: viewport.height(),
                width: viewport.width(),
            },
            &mut surface,
        );

        let mut status = StatusLine::new();
        status.info("Loading...");

        Ok(Self {
            terminal,
            session,
            surface,
            key_bindings: KeyBindings::default(),
            status,
            editor,
            command,
        })
    }

    /// Read one batch from the producer and report progress or failure.
    fn fetch_batch(&mut self) {
        let batch = self.session.fetch(&mut self.surface);
        let total = self.session.total();
        match batch.status {
            BatchStatus::Continuing => self.status.info(format!("loading {total} lines")),
            BatchStatus::EndOfStream => {
                info!(total, "producer finished");
                self.status.info(format!("load {total} lines"));
            }
            BatchStatus::Failed(SourceError::AllocationFailed) => {
                self.status.error("Allocation failure");
            }
            BatchStatus::Failed(SourceError::ReadFailed(err)) => {
                let message = format!("Failed to read {}: {err}", self.session.source_description());
                self.status.error(message);
            }
            BatchStatus::Failed(err) => self.status.error(err.to_string()),
        }
    }

    /// Route one input event. `None` means the event changed nothing and
    /// needs no redraw.
    fn handle_event(&mut self, event: Event) -> Option<Flow> {
        match event {
            Event::Key(key) => Some(self.handle_key(key)),
            Event::Resize(width, height) => {
                self.handle_resize(width, height);
                Some(Flow::Continue)
            }
            _ => None,
        }
    }

    /// Handle a single keyboard event
    ///
    /// The status line is cleared first, so a message lasts until the next
    /// keypress unless the key sets a new one.
    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        self.status.clear();

        let Some(action) = self.key_bindings.get(key) else {
            debug!(?key, "unbound key");
            return Flow::Continue;
        };

        if let Some(request) = action.nav_request() {
            if let Some(notice) = self.session.dispatch(request, &mut self.surface) {
                self.status.info(notice.to_string());
            }
            return Flow::Continue;
        }

        match action {
            KeyAction::Quit => Flow::Quit,
            KeyAction::OpenEditor if self.session.selected().is_some() => Flow::OpenEditor,
            KeyAction::Restart => {
                self.restart();
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    /// Discard the loaded results and rerun the producer.
    fn restart(&mut self) {
        match self.session.restart(&self.command, &mut self.surface) {
            Ok(()) => self.status.info("Loading..."),
            Err(err) => {
                warn!(error = %err, "restart failed");
                self.status.error(err.to_string());
            }
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        let viewport = viewport_for(width, height);
        self.session.dispatch(
            NavRequest::Resize {
                height: viewport.height(),
                width: viewport.width(),
            },
            &mut self.surface,
        );
    }

    /// Render the current frame
    ///
    /// The surface already holds the viewport rows; ratatui's diff flushes
    /// only the cells that changed since the last frame.
    fn draw(&mut self) -> Result<(), AppError> {
        let styles = self.session.format().styles();
        let width = self.session.view().width();
        let title = title_line(self.session.selected(), self.session.total(), width, styles);
        let status = self.status.line(styles);
        let surface = &self.surface;

        self.terminal.draw(|frame| {
            let [rows_area, title_area, status_area] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(TITLE_BAR_HEIGHT),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .areas(frame.area());
            frame.render_widget(surface, rows_area);
            frame.render_widget(title, title_area);
            frame.render_widget(status, status_area);
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        session: Session<GrepFormat>,
        command: &str,
    ) -> Self {
        match Self::with_terminal(terminal, session, command.to_string(), EditorCommand::default())
        {
            Ok(app) => app,
            Err(err) => panic!("test terminal failed: {err}"),
        }
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI over a started session.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit even if the loop failed.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_session(
    session: Session<GrepFormat>,
    command: String,
    editor: EditorCommand,
) -> Result<(), AppError> {
    let result = TuiApp::new(session, command, editor).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

fn enter_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    Ok(())
}

fn leave_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
pub fn restore_terminal() -> Result<(), AppError> {
    leave_terminal()?;
    Ok(())
}
