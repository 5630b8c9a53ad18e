//! Status bar summarizing the request state at the bottom of the screen.

use crate::app::App;

/// Status bar shown on the bottom terminal line.
///
/// Shows: request state | submission count | key hints
#[derive(Debug, Clone)]
pub struct StatusBar {
    /// Whether the status bar is visible
    pub visible: bool,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    /// Create a new status bar with default settings (visible).
    pub fn new() -> Self {
        Self { visible: true }
    }

    /// Create a status bar with the specified visibility.
    pub fn with_visibility(visible: bool) -> Self {
        Self { visible }
    }

    /// Toggle visibility.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Format the status line from the app state.
    ///
    /// Format: " state | submissions:N | hints "
    /// While a request is pending the hints collapse to a progress note,
    /// mirroring the disabled submit key.
    pub fn format(&self, app: &App) -> String {
        let hints = if app.controller.is_pending() {
            "generating..."
        } else {
            "tab:field  arrows:adjust  enter:generate  q:quit"
        };

        format!(
            " {} | submissions:{} | {} ",
            app.controller.state().name(),
            app.controller.submissions(),
            hints,
        )
    }
}
