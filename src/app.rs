//! Application state for the interactive TUI.
//!
//! Bundles the editable configuration, the request lifecycle, and the
//! form focus into one struct that the input handler mutates and the
//! renderer reads.

use crate::request::RequestController;
use crate::video_config::VideoConfig;

/// Seconds added or removed per duration keypress.
pub const DURATION_STEP: i32 = 5;

/// Form field that currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Animation type selector (focused on startup)
    #[default]
    AnimationType,
    /// Duration in seconds
    Duration,
    /// Music style selector
    MusicStyle,
}

impl FormField {
    /// All fields in display order, top to bottom.
    pub const ALL: [FormField; 3] = [
        FormField::AnimationType,
        FormField::Duration,
        FormField::MusicStyle,
    ];

    /// Cycle to the next field.
    ///
    /// Order: AnimationType -> Duration -> MusicStyle -> AnimationType
    pub fn next(&self) -> Self {
        match self {
            FormField::AnimationType => FormField::Duration,
            FormField::Duration => FormField::MusicStyle,
            FormField::MusicStyle => FormField::AnimationType,
        }
    }

    /// Cycle to the previous field.
    pub fn previous(&self) -> Self {
        match self {
            FormField::AnimationType => FormField::MusicStyle,
            FormField::Duration => FormField::AnimationType,
            FormField::MusicStyle => FormField::Duration,
        }
    }

    /// Label shown next to the field's value in the form.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::AnimationType => "Animation",
            FormField::Duration => "Duration",
            FormField::MusicStyle => "Music",
        }
    }
}

/// Top-level state for the interactive TUI.
#[derive(Debug)]
pub struct App {
    /// The configuration being edited
    pub config: VideoConfig,
    /// Lifecycle of the current generation request
    pub controller: RequestController,
    /// Which form field has focus
    pub focus: FormField,
    /// Busy indicator frame, advanced by the event loop tick
    pub spinner_frame: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(VideoConfig::default())
    }
}

impl App {
    /// Create the app around an initial configuration.
    ///
    /// Focus starts on the animation type field with no request pending.
    pub fn new(config: VideoConfig) -> Self {
        Self {
            config,
            controller: RequestController::new(),
            focus: FormField::default(),
            spinner_frame: 0,
        }
    }

    /// Move focus to the next form field.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus to the previous form field.
    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Step the focused field forward.
    ///
    /// Selectors cycle to their next option; the duration grows by
    /// [`DURATION_STEP`] seconds (clamped by the config).
    pub fn increment_focused(&mut self) {
        match self.focus {
            FormField::AnimationType => self.config.cycle_animation_type(),
            FormField::Duration => self.config.adjust_duration(DURATION_STEP),
            FormField::MusicStyle => self.config.cycle_music_style(),
        }
    }

    /// Step the focused field backward.
    pub fn decrement_focused(&mut self) {
        match self.focus {
            FormField::AnimationType => {
                let previous = self.config.animation_type().prev();
                self.config.set_animation_type(previous);
            }
            FormField::Duration => self.config.adjust_duration(-DURATION_STEP),
            FormField::MusicStyle => {
                let previous = self.config.music_style().prev();
                self.config.set_music_style(previous);
            }
        }
    }

    /// Advance the busy indicator by one frame.
    ///
    /// No-op unless a request is pending.
    pub fn tick(&mut self) {
        if self.controller.is_pending() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_config::{AnimationType, MusicStyle};

    #[test]
    fn test_new_app_defaults() {
        let app = App::default();

        assert_eq!(app.focus, FormField::AnimationType);
        assert_eq!(app.config, VideoConfig::default());
        assert!(!app.controller.is_pending());
        assert_eq!(app.spinner_frame, 0);
    }

    #[test]
    fn test_focus_cycles_forward() {
        let mut app = App::default();

        app.focus_next();
        assert_eq!(app.focus, FormField::Duration);
        app.focus_next();
        assert_eq!(app.focus, FormField::MusicStyle);
        app.focus_next();
        assert_eq!(app.focus, FormField::AnimationType); // full cycle
    }

    #[test]
    fn test_focus_cycles_backward() {
        let mut app = App::default();

        app.focus_previous();
        assert_eq!(app.focus, FormField::MusicStyle);
        app.focus_previous();
        assert_eq!(app.focus, FormField::Duration);
        app.focus_previous();
        assert_eq!(app.focus, FormField::AnimationType); // full cycle
    }

    #[test]
    fn test_increment_cycles_animation_type() {
        let mut app = App::default();
        app.focus = FormField::AnimationType;

        app.increment_focused();
        assert_eq!(app.config.animation_type(), AnimationType::Fractal);
        // Other fields untouched
        assert_eq!(app.config.duration(), 30);
        assert_eq!(app.config.music_style(), MusicStyle::Electro);
    }

    #[test]
    fn test_decrement_cycles_animation_type_back() {
        let mut app = App::default();
        app.focus = FormField::AnimationType;

        app.decrement_focused();
        assert_eq!(app.config.animation_type(), AnimationType::Simulation);
        app.increment_focused();
        assert_eq!(app.config.animation_type(), AnimationType::Surprise);
    }

    #[test]
    fn test_increment_steps_duration() {
        let mut app = App::default();
        app.focus = FormField::Duration;

        app.increment_focused();
        assert_eq!(app.config.duration(), 35);
        app.decrement_focused();
        app.decrement_focused();
        assert_eq!(app.config.duration(), 25);
    }

    #[test]
    fn test_duration_steps_stop_at_bounds() {
        let mut app = App::default();
        app.focus = FormField::Duration;

        for _ in 0..20 {
            app.increment_focused();
        }
        assert_eq!(app.config.duration(), 60);

        for _ in 0..20 {
            app.decrement_focused();
        }
        assert_eq!(app.config.duration(), 15);
    }

    #[test]
    fn test_increment_cycles_music_style() {
        let mut app = App::default();
        app.focus = FormField::MusicStyle;

        app.increment_focused();
        assert_eq!(app.config.music_style(), MusicStyle::Lofi);
        app.decrement_focused();
        assert_eq!(app.config.music_style(), MusicStyle::Electro);
    }

    #[test]
    fn test_tick_is_noop_when_idle() {
        let mut app = App::default();

        app.tick();
        app.tick();
        assert_eq!(app.spinner_frame, 0);
    }

    #[test]
    fn test_tick_advances_while_pending() {
        let mut app = App::default();
        app.controller.begin_submission().unwrap();

        app.tick();
        app.tick();
        app.tick();
        assert_eq!(app.spinner_frame, 3);
    }

    #[test]
    fn test_field_labels() {
        assert_eq!(FormField::AnimationType.label(), "Animation");
        assert_eq!(FormField::Duration.label(), "Duration");
        assert_eq!(FormField::MusicStyle.label(), "Music");
    }

    #[test]
    fn test_all_fields_in_display_order() {
        assert_eq!(
            FormField::ALL,
            [
                FormField::AnimationType,
                FormField::Duration,
                FormField::MusicStyle
            ]
        );
    }
}
