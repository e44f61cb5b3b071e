//! View and playback settings shared by the frame driver and the controls.

use engine_core::ViewTransform;

use crate::config::OrreryConfig;

/// Which family of bodies the view is built around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Star at the center, planets on their orbits.
    #[default]
    SolarSystem,
    /// A planet (or one of its moons) at the center with its moons around it.
    PlanetMoons,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Simulated days elapsed.
    pub time: f64,
    /// Days per frame is half of this.
    pub time_speed: f64,
    pub view: ViewTransform,
    /// Pixels per scene unit.
    pub scale: f64,
    pub show_orbits: bool,
    pub show_labels: bool,
    pub show_compound_names: bool,
    pub paused: bool,
    pub label_font_size: f64,
    pub view_mode: ViewMode,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::from_config(&OrreryConfig::default())
    }
}

impl SimulationState {
    pub fn from_config(config: &OrreryConfig) -> Self {
        Self {
            time: 0.0,
            time_speed: config.time_speed,
            view: ViewTransform::new(config.inclination.clamp(-90.0, 90.0), config.rotation.rem_euclid(360.0)),
            scale: 1.0,
            show_orbits: config.show_orbits,
            show_labels: config.show_labels,
            show_compound_names: config.show_compound_names,
            paused: false,
            label_font_size: config.label_font_size,
            view_mode: ViewMode::SolarSystem,
        }
    }

    /// Advance the clock by one frame's worth of simulated days.
    pub fn advance(&mut self) {
        self.time += self.time_speed * 0.5;
    }
}
