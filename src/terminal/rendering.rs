//! Rendering functions for the generator TUI.
//!
//! Pure drawing logic separated from terminal lifecycle management. All
//! functions operate on ratatui Frame objects without touching terminal
//! state, so they render identically into a test backend.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::StatusBar;
use crate::app::{App, FormField};
use crate::request::RequestState;

/// Height of the form block: one row per field plus the border.
const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 + 2;

/// Busy indicator frames, advanced once per event loop tick.
const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the configuration form with the focused field highlighted.
///
/// # Arguments
/// * `frame` - The ratatui frame to render to
/// * `app` - The app state (config values and focus)
/// * `area` - The area to render the form in
pub fn render_form(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut lines = Vec::with_capacity(FormField::ALL.len());
    for field in FormField::ALL {
        let focused = field == app.focus;
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<10}", marker, field.label()), style),
            Span::styled(field_value(app, field), style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Video Generator ")
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// The display string for one form field's current value.
fn field_value(app: &App, field: FormField) -> String {
    match field {
        FormField::AnimationType => app.config.animation_type().name().to_string(),
        FormField::Duration => format!("{}s", app.config.duration()),
        FormField::MusicStyle => app.config.music_style().name().to_string(),
    }
}

/// Render the outcome of the current request below the form.
///
/// Exactly one presentation per state:
/// - `Idle` renders nothing
/// - `Pending` renders a busy line (no result or error panel)
/// - `Succeeded` renders the result panel, with the video reference and
///   suggested filename when a video URL is present
/// - `Failed` renders the error panel with the failure message
pub fn render_outcome(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    match app.controller.state() {
        RequestState::Idle => {}
        RequestState::Pending => {
            let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
            let paragraph = Paragraph::new(format!("{} Generating video...", spinner))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(paragraph, area);
        }
        RequestState::Succeeded { result } => {
            let mut text = format!("{}\nJob ID: {}", result.message, result.job_id);
            if let Some(url) = &result.video_url {
                text.push_str(&format!(
                    "\nVideo URL: {}\nSave as: {}",
                    url,
                    result.download_name()
                ));
            }

            let block = Block::default()
                .borders(Borders::ALL)
                .title(" Result ")
                .border_style(Style::default().fg(Color::Green));
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(Color::White))
                .block(block);
            frame.render_widget(paragraph, area);
        }
        RequestState::Failed { message } => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(" Error ")
                .border_style(Style::default().fg(Color::Red));
            let paragraph = Paragraph::new(message.clone())
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(paragraph, area);
        }
    }
}

/// Render the status bar on the bottom line of the given area.
///
/// # Arguments
/// * `frame` - The ratatui frame to render to
/// * `status_bar` - The status bar to render
/// * `app` - The app state (used for the status text)
/// * `area` - The full terminal area (status bar takes the bottom line)
pub fn render_status_bar(
    frame: &mut ratatui::Frame,
    status_bar: &StatusBar,
    app: &App,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };
    let status_paragraph = Paragraph::new(status_bar.format(app))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status_paragraph, status_area);
}

/// Render a complete frame with all layers.
///
/// Layout, top to bottom: the configuration form, the request outcome,
/// and the status bar on the last line (when visible).
pub fn render_full_frame(
    frame: &mut ratatui::Frame,
    app: &App,
    status_bar: Option<&StatusBar>,
    area: Rect,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let show_status = status_bar.is_some_and(|sb| sb.visible);
    let main_area = if show_status {
        Rect {
            height: area.height.saturating_sub(1),
            ..area
        }
    } else {
        area
    };

    let form_area = Rect {
        height: main_area.height.min(FORM_HEIGHT),
        ..main_area
    };
    render_form(frame, app, form_area);

    let outcome_area = Rect {
        y: main_area.y + form_area.height,
        height: main_area.height.saturating_sub(form_area.height),
        ..main_area
    };
    render_outcome(frame, app, outcome_area);

    if show_status {
        if let Some(sb) = status_bar {
            render_status_bar(frame, sb, app, area);
        }
    }
}
