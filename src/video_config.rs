//! User-editable parameters for one video generation request.

use serde::{Deserialize, Serialize};

/// Minimum allowed video duration in seconds.
pub const MIN_DURATION_SECS: u32 = 15;
/// Maximum allowed video duration in seconds.
pub const MAX_DURATION_SECS: u32 = 60;
/// Default video duration in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 30;

/// Kind of animation the service should generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    /// Let the service pick a concept (default)
    #[default]
    Surprise,
    Fractal,
    Game,
    Dataviz,
    Art,
    Simulation,
}

impl AnimationType {
    /// Parse an animation type name from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "surprise" => Some(Self::Surprise),
            "fractal" => Some(Self::Fractal),
            "game" => Some(Self::Game),
            "dataviz" => Some(Self::Dataviz),
            "art" => Some(Self::Art),
            "simulation" => Some(Self::Simulation),
            _ => None,
        }
    }

    /// Cycle to the next animation type.
    pub fn next(self) -> Self {
        match self {
            AnimationType::Surprise => AnimationType::Fractal,
            AnimationType::Fractal => AnimationType::Game,
            AnimationType::Game => AnimationType::Dataviz,
            AnimationType::Dataviz => AnimationType::Art,
            AnimationType::Art => AnimationType::Simulation,
            AnimationType::Simulation => AnimationType::Surprise,
        }
    }

    /// Cycle to the previous animation type.
    pub fn prev(self) -> Self {
        match self {
            AnimationType::Surprise => AnimationType::Simulation,
            AnimationType::Fractal => AnimationType::Surprise,
            AnimationType::Game => AnimationType::Fractal,
            AnimationType::Dataviz => AnimationType::Game,
            AnimationType::Art => AnimationType::Dataviz,
            AnimationType::Simulation => AnimationType::Art,
        }
    }

    /// Get the wire/display name for the animation type.
    pub fn name(&self) -> &'static str {
        match self {
            AnimationType::Surprise => "surprise",
            AnimationType::Fractal => "fractal",
            AnimationType::Game => "game",
            AnimationType::Dataviz => "dataviz",
            AnimationType::Art => "art",
            AnimationType::Simulation => "simulation",
        }
    }
}

/// Music style mixed into the generated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicStyle {
    /// Electronic soundtrack (default)
    #[default]
    Electro,
    Lofi,
    Epic,
    Chill,
}

impl MusicStyle {
    /// Parse a music style name from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "electro" => Some(Self::Electro),
            "lofi" => Some(Self::Lofi),
            "epic" => Some(Self::Epic),
            "chill" => Some(Self::Chill),
            _ => None,
        }
    }

    /// Cycle to the next music style.
    pub fn next(self) -> Self {
        match self {
            MusicStyle::Electro => MusicStyle::Lofi,
            MusicStyle::Lofi => MusicStyle::Epic,
            MusicStyle::Epic => MusicStyle::Chill,
            MusicStyle::Chill => MusicStyle::Electro,
        }
    }

    /// Cycle to the previous music style.
    pub fn prev(self) -> Self {
        match self {
            MusicStyle::Electro => MusicStyle::Chill,
            MusicStyle::Lofi => MusicStyle::Electro,
            MusicStyle::Epic => MusicStyle::Lofi,
            MusicStyle::Chill => MusicStyle::Epic,
        }
    }

    /// Get the wire/display name for the music style.
    pub fn name(&self) -> &'static str {
        match self {
            MusicStyle::Electro => "electro",
            MusicStyle::Lofi => "lofi",
            MusicStyle::Epic => "epic",
            MusicStyle::Chill => "chill",
        }
    }
}

/// Parameters of the next generation request.
///
/// One live instance, owned by the UI layer and read by the submission path.
/// Serializes directly as the `/api/generate` request body, so the field
/// names here are the wire names.
///
/// The duration is kept private so every write goes through a clamping
/// setter: a stored value outside [15, 60] is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoConfig {
    animation_type: AnimationType,
    duration: u32,
    music_style: MusicStyle,
}

impl VideoConfig {
    /// Create a config with the service defaults (surprise, 30s, electro).
    pub fn new() -> Self {
        Self {
            animation_type: AnimationType::default(),
            duration: DEFAULT_DURATION_SECS,
            music_style: MusicStyle::default(),
        }
    }

    /// Build a config from explicit values.
    ///
    /// The duration is clamped to [15, 60] like any other write.
    pub fn with_values(animation_type: AnimationType, duration: u32, music_style: MusicStyle) -> Self {
        let mut config = Self::new();
        config.set_animation_type(animation_type);
        config.set_duration(duration);
        config.set_music_style(music_style);
        config
    }

    /// Get the current animation type.
    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    /// Get the current duration in seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Get the current music style.
    pub fn music_style(&self) -> MusicStyle {
        self.music_style
    }

    /// Set the animation type.
    pub fn set_animation_type(&mut self, value: AnimationType) {
        self.animation_type = value;
    }

    /// Set the duration in seconds, clamped to [15, 60].
    pub fn set_duration(&mut self, secs: u32) {
        self.duration = secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
    }

    /// Set the music style.
    pub fn set_music_style(&mut self, value: MusicStyle) {
        self.music_style = value;
    }

    /// Cycle the animation type to the next option.
    pub fn cycle_animation_type(&mut self) {
        self.animation_type = self.animation_type.next();
    }

    /// Cycle the music style to the next option.
    pub fn cycle_music_style(&mut self) {
        self.music_style = self.music_style.next();
    }

    /// Adjust the duration by a signed number of seconds, clamped to [15, 60].
    pub fn adjust_duration(&mut self, delta: i32) {
        let adjusted = self.duration as i64 + delta as i64;
        self.duration = adjusted.clamp(MIN_DURATION_SECS as i64, MAX_DURATION_SECS as i64) as u32;
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self::new()
    }
}
