//! Panic-safe tracking of raw terminal mode.
//!
//! Raw mode survives a panic unless something turns it off, which leaves
//! the user's shell unusable. A process-wide flag records whether raw
//! mode is on, and the installed panic hook consults it to put the
//! terminal back before the panic message prints.

use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::terminal::disable_raw_mode;

/// Process-wide flag tracking whether raw mode is currently on.
pub(crate) static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Install a panic hook that restores the terminal before the panic
/// message is printed.
///
/// Safe to call repeatedly; only the first call installs the hook.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.load(Ordering::SeqCst) {
            // Leave alternate screen first so the panic output is visible
            let _ = crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen);
            let _ = disable_raw_mode();
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
        }

        original_hook(panic_info);
    }));
}
