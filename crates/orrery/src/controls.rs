//! Controls adapter: wheel sliders, toggles and readouts over an [`Orrery`].
//!
//! The adapter keeps only its own slider accumulators. Every setting it
//! changes is written straight into the orrery, so the view never disagrees
//! with the controls.

use input::{time_slider_for, time_speed, zoom_scale, zoom_slider_for, VirtualSlider, WheelInput};

use crate::simulation::{SimulationState, ViewMode};
use crate::state::Orrery;
use crate::system::BodyId;

/// Below this scale, zooming out of a moon view returns to the star.
pub const MOON_VIEW_EXIT_SCALE: f64 = 0.5;

const FRAMES_PER_SECOND: f64 = 60.0;
const DAYS_PER_FRAME: f64 = 0.5;
const EARTH_PERIOD_DAYS: f64 = 365.0;
const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

// ── Scale bars ──────────────────────────────────────────────────────────
const SCALE_BAR_PX: f64 = 100.0;
const AU_KM: f64 = 149_600_000.0;
const UNITS_PER_AU: f64 = 100.0;
const EARTH_DIAMETER_KM: f64 = 12_756.0;
const EARTH_RADIUS_PX: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct Controls {
    zoom: VirtualSlider,
    time: VirtualSlider,
}

/// Text shown next to each control.
#[derive(Debug, Clone, PartialEq)]
pub struct Readouts {
    pub inclination: String,
    pub rotation: String,
    pub scale: String,
    pub time_speed: String,
    pub font_size: String,
    pub orbit_scale: String,
    pub planet_scale: String,
    pub pause_button: &'static str,
}

impl Controls {
    /// Sliders positioned to match the current scale and time speed.
    ///
    /// A scale or speed the log mapping cannot represent (zero, negative,
    /// not finite) leaves that slider at its start position.
    pub fn new(sim: &SimulationState) -> Self {
        Self {
            zoom: VirtualSlider::new(zoom_slider_for(sim.scale)),
            time: VirtualSlider::new(time_slider_for(sim.time_speed)),
        }
    }

    pub fn zoom_slider(&self) -> f64 {
        self.zoom.value()
    }

    pub fn time_slider(&self) -> f64 {
        self.time.value()
    }

    /// Sideways scrolls steer time speed; vertical ones zoom.
    pub fn wheel(&mut self, orrery: &mut Orrery, event: WheelInput) {
        if event.is_horizontal() {
            self.time.nudge(event.time_delta());
            orrery.set_time_speed(time_speed(self.time.value()));
            log::debug!(
                "time speed {:.3} ({})",
                orrery.sim().time_speed,
                real_time_multiplier(orrery.sim().time_speed)
            );
        } else {
            self.zoom.nudge(event.delta_y);
            self.apply_zoom(orrery);
        }
    }

    fn apply_zoom(&self, orrery: &mut Orrery) {
        let previous = orrery.sim().scale;
        let scale = zoom_scale(self.zoom.value());
        orrery.set_scale(scale);
        // Only zooming out through the threshold leaves the moon view.
        if orrery.sim().view_mode == ViewMode::PlanetMoons
            && scale < MOON_VIEW_EXIT_SCALE
            && scale < previous
        {
            log::info!("zoomed out of moon view");
            orrery.set_center(BodyId::STAR);
        }
    }

    pub fn toggle_orbits(&self, orrery: &mut Orrery) -> bool {
        let on = !orrery.sim().show_orbits;
        orrery.set_show_orbits(on);
        on
    }

    pub fn toggle_labels(&self, orrery: &mut Orrery) -> bool {
        let on = !orrery.sim().show_labels;
        orrery.set_show_labels(on);
        on
    }

    pub fn toggle_compound_names(&self, orrery: &mut Orrery) -> bool {
        let on = !orrery.sim().show_compound_names;
        orrery.set_show_compound_names(on);
        on
    }

    pub fn set_font_size(&self, orrery: &mut Orrery, px: u32) {
        orrery.set_label_font_size(px as f64);
    }

    pub fn readouts(&self, orrery: &Orrery) -> Readouts {
        let sim = orrery.sim();
        Readouts {
            inclination: format!("{}°", sim.view.inclination.round()),
            rotation: format!("{}°", sim.view.rotation.round()),
            scale: format!("{:.2}x", sim.scale),
            time_speed: real_time_multiplier(sim.time_speed),
            font_size: format!("{}px", sim.label_font_size),
            orbit_scale: orbit_scale_text(sim.scale),
            planet_scale: planet_scale_text(sim.scale),
            pause_button: if sim.paused { "Play" } else { "Pause" },
        }
    }
}

/// How much faster than real time the simulation runs at 60 frames a second.
pub fn real_time_multiplier(speed: f64) -> String {
    let days_per_second = FRAMES_PER_SECOND * speed * DAYS_PER_FRAME;
    let seconds_per_orbit = EARTH_PERIOD_DAYS / days_per_second;
    let multiplier = SECONDS_PER_YEAR / seconds_per_orbit;
    if multiplier >= 1_000_000.0 {
        format!("{:.1}M×", multiplier / 1_000_000.0)
    } else if multiplier >= 1_000.0 {
        format!("{:.1}K×", multiplier / 1_000.0)
    } else {
        format!("{:.0}×", multiplier)
    }
}

pub fn format_distance(km: f64) -> String {
    if km >= 1e9 {
        format!("{:.1} billion km", km / 1e9)
    } else if km >= 1e6 {
        format!("{:.1} million km", km / 1e6)
    } else if km >= 1e3 {
        format!("{:.0} thousand km", km / 1e3)
    } else {
        format!("{:.0} km", km)
    }
}

/// Distance covered by a 100 px bar on the orbit scale.
pub fn orbit_scale_text(scale: f64) -> String {
    format_distance(SCALE_BAR_PX / (UNITS_PER_AU * scale) * AU_KM)
}

/// Distance covered by a 100 px bar on the body-size scale.
pub fn planet_scale_text(scale: f64) -> String {
    let km_per_px = EARTH_DIAMETER_KM / (EARTH_RADIUS_PX * 2.0 * scale);
    format_distance(SCALE_BAR_PX * km_per_px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrreryConfig;
    use renderer::CountingCanvas;
    use std::time::Duration;

    fn setup() -> (Orrery, Controls) {
        let orrery = Orrery::with_builtin_data(&OrreryConfig::default()).unwrap();
        let controls = Controls::new(orrery.sim());
        (orrery, controls)
    }

    #[test]
    fn sliders_start_at_their_defaults() {
        let (_, c) = setup();
        assert!((c.zoom_slider() - 50.0).abs() < 1e-9);
        assert!((c.time_slider() - 55.0).abs() < 1e-9);
    }

    #[test]
    fn stopped_or_reversed_time_keeps_sliders_usable() {
        for speed in [0.0, -1.5] {
            let config = OrreryConfig {
                time_speed: speed,
                ..Default::default()
            };
            let mut o = Orrery::with_builtin_data(&config).unwrap();
            let mut c = Controls::new(o.sim());
            assert_eq!(c.time_slider(), 55.0);
            assert_eq!(c.zoom_slider(), 50.0);

            c.wheel(&mut o, WheelInput::horizontal(10.0));
            assert_eq!(c.time_slider(), 55.5);
            assert!(o.sim().time_speed.is_finite() && o.sim().time_speed > 1.0);
        }
    }

    #[test]
    fn zoom_slider_fifty_to_sixty() {
        let (mut o, mut c) = setup();
        for _ in 0..20 {
            c.wheel(&mut o, WheelInput::vertical(100.0));
        }
        assert!((c.zoom_slider() - 60.0).abs() < 1e-9);
        assert!((o.sim().scale - 0.398).abs() < 1e-3);
        assert_eq!(c.readouts(&o).scale, "0.40x");
    }

    #[test]
    fn sideways_scroll_changes_time_speed_only() {
        let (mut o, mut c) = setup();
        c.wheel(&mut o, WheelInput::horizontal(30.0));
        assert_eq!(c.time_slider(), 55.5);
        assert!(o.sim().time_speed > 1.0);
        assert_eq!(o.sim().scale, 1.0);

        let shifted = WheelInput {
            delta_y: -10.0,
            shift: true,
            ..Default::default()
        };
        c.wheel(&mut o, shifted);
        assert_eq!(c.time_slider(), 55.0);
        assert!((o.sim().time_speed - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zooming_out_leaves_moon_view() {
        let (mut o, mut c) = setup();
        o.set_center_by_name("Earth");
        o.frame(Duration::from_millis(600), &mut CountingCanvas::new());
        assert_eq!(o.center().current(), o.system().id_of("Earth").unwrap());
        assert_eq!(o.sim().view_mode, ViewMode::PlanetMoons);
        // Slider 57.5 gives scale 0.501; the next step out crosses 0.5.
        for _ in 0..15 {
            c.wheel(&mut o, WheelInput::vertical(1.0));
        }
        assert_eq!(o.sim().view_mode, ViewMode::PlanetMoons);
        c.wheel(&mut o, WheelInput::vertical(1.0));
        assert!(o.sim().scale < MOON_VIEW_EXIT_SCALE);
        assert_eq!(o.sim().view_mode, ViewMode::SolarSystem);
    }

    #[test]
    fn zooming_in_below_threshold_keeps_moon_view() {
        let (mut o, mut c) = setup();
        for _ in 0..40 {
            c.wheel(&mut o, WheelInput::vertical(1.0));
        }
        assert!(o.sim().scale < MOON_VIEW_EXIT_SCALE);
        o.set_center_by_name("Jupiter");
        c.wheel(&mut o, WheelInput::vertical(-1.0));
        assert!(o.sim().scale < MOON_VIEW_EXIT_SCALE);
        assert_eq!(o.sim().view_mode, ViewMode::PlanetMoons);
    }

    #[test]
    fn toggles_write_through() {
        let (mut o, c) = setup();
        assert!(!c.toggle_orbits(&mut o));
        assert!(!o.sim().show_orbits);
        assert!(c.toggle_compound_names(&mut o));
        assert!(o.sim().show_compound_names);
        c.set_font_size(&mut o, 16);
        assert_eq!(c.readouts(&o).font_size, "16px");
    }

    #[test]
    fn multiplier_formatting() {
        assert_eq!(real_time_multiplier(1.0), "2.6M×");
        assert_eq!(real_time_multiplier(0.001), "2.6K×");
        assert_eq!(real_time_multiplier(0.0001), "259×");
    }

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(2.5e9), "2.5 billion km");
        assert_eq!(format_distance(149_600_000.0), "149.6 million km");
        assert_eq!(format_distance(127_560.0), "128 thousand km");
        assert_eq!(format_distance(12.0), "12 km");
        assert_eq!(orbit_scale_text(1.0), "149.6 million km");
        assert_eq!(planet_scale_text(1.0), "128 thousand km");
    }

    #[test]
    fn readouts_round_angles() {
        let (o, c) = setup();
        let r = c.readouts(&o);
        assert_eq!(r.inclination, "60°");
        assert_eq!(r.rotation, "0°");
        assert_eq!(r.pause_button, "Pause");
    }
}
