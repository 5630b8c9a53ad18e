//! Configuration file handling for vidgen.
//!
//! Loads configuration from `~/.config/vidgen/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::video_config::{AnimationType, MusicStyle, VideoConfig};

/// Configuration file structure for vidgen.
/// Loaded from ~/.config/vidgen/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct ServerConfig {
    pub url: Option<String>,
}

/// Starting values for the generation form. Unset fields fall back to
/// the service defaults.
#[derive(Debug, Deserialize, Default)]
pub struct GenerateConfig {
    #[serde(default)]
    pub animation_type: Option<AnimationType>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub music_style: Option<MusicStyle>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DownloadConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// With an explicit path the file must exist; with the default path
    /// a missing file just yields the default configuration. A file that
    /// exists but cannot be read or parsed is always an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound { path });
            }
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.clone(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        Ok(config)
    }

    /// Build the starting video configuration from the `[generate]` section.
    ///
    /// Values flow through the regular setters, so an out-of-range
    /// duration in the file is clamped rather than rejected.
    pub fn video_config(&self) -> VideoConfig {
        let mut config = VideoConfig::new();
        if let Some(animation) = self.generate.animation_type {
            config.set_animation_type(animation);
        }
        if let Some(duration) = self.generate.duration {
            config.set_duration(duration);
        }
        if let Some(style) = self.generate.music_style {
            config.set_music_style(style);
        }
        config
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    NotFound {
        path: PathBuf,
    },
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound { path } => {
                write!(f, "Config file '{}' not found", path.display())
            }
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NotFound { .. } => None,
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("vidgen").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/vidgen/config.toml")
        })
}
