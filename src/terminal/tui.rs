//! TUI wrapper that manages the ratatui terminal with crossterm backend.
//!
//! Owns the terminal lifecycle (raw mode, alternate screen, cursor) and
//! delegates the actual drawing to the `rendering` module.

use std::io::{self, Stdout};
use std::sync::atomic::Ordering;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::raw_mode::{install_panic_hook, RAW_MODE_ACTIVE};
use super::rendering;
use super::StatusBar;
use crate::app::App;

/// Full-screen terminal session for the generator form.
///
/// Creating a `Tui` enters raw mode and the alternate screen; dropping
/// it (or calling [`restore`](Tui::restore)) puts the terminal back.
/// The panic hook installed on creation restores the terminal even when
/// the app panics mid-draw.
pub struct Tui {
    /// The ratatui terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether this instance still owns the terminal state
    active: bool,
}

impl Tui {
    /// Enter raw mode and the alternate screen, ready for drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode, the alternate screen, or the
    /// ratatui terminal cannot be set up. This is the normal failure
    /// mode when stdout is not a TTY.
    pub fn new() -> io::Result<Self> {
        // The hook must be in place before raw mode is on
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Mutable access to the underlying ratatui terminal.
    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Draw one frame of the app: form, request outcome, status bar.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn draw(&mut self, app: &App, status_bar: Option<&StatusBar>) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            rendering::render_full_frame(frame, app, status_bar, area);
        })?;

        Ok(())
    }

    /// Restore the terminal to its original state.
    ///
    /// Leaves the alternate screen, disables raw mode, and shows the
    /// cursor. After this the drop handler is a no-op, and calling
    /// `restore` again does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if any cleanup step fails.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            )?;
            disable_raw_mode()?;
            self.terminal.show_cursor()?;
        }
        Ok(())
    }

    /// Whether the terminal state has not been restored yet.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            // Best-effort cleanup; errors cannot be surfaced from drop
            let _ = crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            );
            let _ = disable_raw_mode();
            let _ = self.terminal.show_cursor();
        }
    }
}
