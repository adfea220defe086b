//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory holding `inputs/` and `outputs/`.
    pub project_root: PathBuf,

    /// Log scanning settings.
    pub locator: LocatorConfig,

    /// Clip window and transition settings.
    pub clips: ClipConfig,

    /// Encoder settings for the stitched highlight.
    pub encode: EncodeConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Patterns and frame rate used when scanning a demo log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Regex for frame marker lines. The first capture group is the frame number.
    pub frame_pattern: String,

    /// Regex for kill event lines, matched case-insensitively.
    pub event_pattern: String,

    /// Server frames per second.
    pub frame_rate: f64,
}

/// Padding around each event and crossfade length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Seconds kept before each event.
    pub seconds_before: f64,

    /// Seconds kept after each event.
    pub seconds_after: f64,

    /// Crossfade duration between consecutive clips.
    pub transition_secs: f64,
}

/// Encoder parameters for the final re-encode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub video_codec: String,
    pub preset: String,
    pub crf: u32,
    pub audio_codec: String,
    pub audio_bitrate_kbps: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "fragreel=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            locator: LocatorConfig::default(),
            clips: ClipConfig::default(),
            encode: EncodeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            frame_pattern: r"Frame \[(\d+)\]".to_string(),
            event_pattern: r"^Print - .* was railed by maddox".to_string(),
            frame_rate: 10.0,
        }
    }
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            seconds_before: 7.0,
            seconds_after: 3.0,
            transition_secs: 0.5,
        }
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            preset: "fast".to_string(),
            crf: 18,
            audio_codec: "aac".to_string(),
            audio_bitrate_kbps: 192,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("fragreel").join("config.json")
}
