//! Async event loop for the interactive TUI.
//!
//! This module separates the main event loop logic from initialization.
//! The loop redraws after every handled event, so the screen always
//! reflects the latest app state.

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::api::GeneratorClient;
use crate::app::App;
use crate::input::{handle_key_event, KeyAction};
use crate::request::GenerationOutcome;
use crate::terminal::{StatusBar, Tui};

/// How often the busy indicator advances while a request is pending.
const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Async main event loop using tokio::select! for concurrent handling.
///
/// The loop handles three concurrent concerns:
/// 1. Terminal events (keyboard input, resize) via crossterm EventStream
/// 2. Outcomes of generation requests, delivered over a channel from the
///    spawned request task
/// 3. A steady tick that advances the busy indicator
///
/// The loop exits when the user quits or the event stream ends.
pub async fn run(
    tui: &mut Tui,
    app: &mut App,
    client: GeneratorClient,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let status_bar = StatusBar::new();
    let mut event_stream = EventStream::new();

    // Request outcomes come back over this channel
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<GenerationOutcome>();

    let mut tick_interval = tokio::time::interval(TICK_INTERVAL);
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // First frame before any input arrives
    tui.draw(app, Some(&status_bar))?;

    loop {
        tokio::select! {
            // Terminal events (keyboard input, resize)
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        match event {
                            Event::Key(key_event) => {
                                match handle_key_event(key_event, app) {
                                    KeyAction::Submit => {
                                        submit(app, &client, &outcome_tx);
                                    }
                                    KeyAction::Quit => break,
                                    KeyAction::Handled | KeyAction::None => {}
                                }
                            }
                            Event::Resize(_, _) => {
                                // The redraw below picks up the new size
                            }
                            _ => {
                                // Ignore other events (mouse, focus, etc.)
                            }
                        }
                    }
                    Some(Err(e)) => {
                        return Err(Box::new(e));
                    }
                    None => {
                        // Event stream ended - shouldn't happen normally
                        break;
                    }
                }
            }

            // Outcome of the in-flight generation request
            maybe_outcome = outcome_rx.recv() => {
                match maybe_outcome {
                    Some(outcome) => {
                        app.controller.resolve(outcome);
                    }
                    None => {
                        // Channel closed
                        break;
                    }
                }
            }

            // Busy indicator ticks
            _ = tick_interval.tick() => {
                app.tick();
            }
        }

        tui.draw(app, Some(&status_bar))?;
    }

    Ok(())
}

/// Start a generation request in the background.
///
/// The configuration is snapshotted at submission time, so edits made
/// while the request is in flight do not affect it. When a request is
/// already pending the controller rejects the attempt and nothing is
/// spawned, so at most one request is ever in flight.
fn submit(
    app: &mut App,
    client: &GeneratorClient,
    outcome_tx: &mpsc::UnboundedSender<GenerationOutcome>,
) {
    if app.controller.begin_submission().is_err() {
        // Already pending; the input layer normally filters this
        return;
    }

    let client = client.clone();
    let config = app.config.clone();
    let outcome_tx = outcome_tx.clone();

    tokio::spawn(async move {
        let outcome = client.generate(&config).await;
        // The receiver only drops once the loop has exited
        let _ = outcome_tx.send(outcome);
    });
}
