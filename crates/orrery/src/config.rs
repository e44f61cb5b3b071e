//! Orrery configuration (viewport, initial view, display toggles). Loaded from orrery.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Startup settings. Loaded from `orrery.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrreryConfig {
    /// Viewport width in logical pixels.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    /// Viewport height in logical pixels.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    /// Initial view tilt in degrees (-90..=90).
    #[serde(default = "default_inclination")]
    pub inclination: f64,
    /// Initial view spin in degrees (0..360).
    #[serde(default)]
    pub rotation: f64,
    /// Simulated days advanced per frame is half of this.
    #[serde(default = "default_time_speed")]
    pub time_speed: f64,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_true")]
    pub show_orbits: bool,
    #[serde(default = "default_true")]
    pub show_labels: bool,
    /// Label composition segments with compound names instead of formulas.
    #[serde(default)]
    pub show_compound_names: bool,
    /// Frames the headless binary simulates.
    #[serde(default = "default_headless_frames")]
    pub headless_frames: u32,
}

fn default_viewport_width() -> u32 {
    1280
}
fn default_viewport_height() -> u32 {
    720
}
fn default_inclination() -> f64 {
    60.0
}
fn default_time_speed() -> f64 {
    1.0
}
fn default_label_font_size() -> f64 {
    12.0
}
fn default_true() -> bool {
    true
}
fn default_headless_frames() -> u32 {
    600
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            inclination: default_inclination(),
            rotation: 0.0,
            time_speed: default_time_speed(),
            label_font_size: default_label_font_size(),
            show_orbits: default_true(),
            show_labels: default_true(),
            show_compound_names: false,
            headless_frames: default_headless_frames(),
        }
    }
}

impl OrreryConfig {
    /// Load config from `orrery.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => {
                    log::info!("Loaded config from {:?}", path);
                    return c;
                }
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `orrery.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("orrery.ron")
}
