//! Terminal management module - raw mode, TUI wrapper, rendering, and cleanup.

mod raw_mode;
mod rendering;
mod status_bar;
mod tui;

// Re-export public types from submodules
pub use rendering::{render_form, render_full_frame, render_outcome, render_status_bar};
pub use status_bar::StatusBar;
pub use tui::Tui;
