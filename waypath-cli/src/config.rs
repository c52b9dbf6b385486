//! Waypath configuration loading from `.waypathrc.toml`.
//!
//! Configuration is optional. Every section falls back to built-in defaults
//! when the file or a key is missing, and a malformed file is reported as a
//! warning rather than an error.
//!
//! # Example Configuration
//!
//! ```toml
//! [animation]
//! duration_ms = 2000
//! fps = 60
//!
//! [weights]
//! min = 10
//! max = 309
//! seed = 42
//!
//! [output]
//! format = "table"
//! color = true
//! ```

use serde::Deserialize;
use std::path::Path;
use waypath_core::{SessionSettings, WeightRange};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = ".waypathrc.toml";

/// Root configuration structure loaded from `.waypathrc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct WaypathConfig {
    /// Path reveal timing.
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Range used when regenerating edge weights.
    #[serde(default)]
    pub weights: WeightsConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Animation section.
#[derive(Debug, Deserialize)]
pub struct AnimationConfig {
    /// Total reveal time of a path, in milliseconds.
    ///
    /// Default: `2000`
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Frames sampled per second by `waypath animate`.
    ///
    /// Default: `60`
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_duration_ms() -> u64 {
    2000
}

fn default_fps() -> u32 {
    60
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            fps: default_fps(),
        }
    }
}

/// Weight regeneration section.
///
/// Bounds are inclusive; reversed bounds are swapped.
#[derive(Debug, Deserialize, Default)]
pub struct WeightsConfig {
    #[serde(default)]
    pub min: Option<u32>,

    #[serde(default)]
    pub max: Option<u32>,

    /// Fixed seed for reproducible weights. Entropy is used when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Defaults to TTY detection.
    #[serde(default)]
    pub color: Option<bool>,
}

impl WaypathConfig {
    /// Load configuration from `.waypathrc.toml` in the given directory.
    ///
    /// Returns defaults if the file is missing or can't be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    /// Weight range with missing bounds taken from the default range.
    pub fn weight_range(&self) -> WeightRange {
        let default = WeightRange::default();
        WeightRange::new(
            self.weights.min.unwrap_or(default.min),
            self.weights.max.unwrap_or(default.max),
        )
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            animation_duration_ms: self.animation.duration_ms,
            weight_range: self.weight_range(),
        }
    }
}
