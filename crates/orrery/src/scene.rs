//! Builds the display list for one frame of the solar-system view.

use std::f64::consts::PI;

use catalogue::{CompositionTable, FormulaRegistry};
use engine_core::{Color, DVec2, DVec3};
use renderer::{text_bounds, DisplayList, Shape, Stroke, TextStyle};

use crate::body_state::BodyStates;
use crate::composition::CompositionRing;
use crate::hover::{HitArea, HitAreas, HitTag, MIN_ORBIT_RADIUS_FOR_LABEL};
use crate::hover_anim::HoverAnimations;
use crate::orbit::orbit_ring;
use crate::simulation::SimulationState;
use crate::system::{Body, BodyId, BodyKind, SolarSystem};

/// Paint order, bottom to top.
pub mod layer {
    use renderer::Layer;

    pub const AXIS: Layer = 0;
    pub const ORBITS: Layer = 1;
    pub const PLANETS: Layer = 2;
    pub const LABELS: Layer = 3;
    pub const MOONS: Layer = 4;
    pub const CLICK_AREAS: Layer = 5;
}

pub const AXIS_LENGTH: f64 = 50.0;
const AXIS_OPACITY: f32 = 0.7;
const PLANET_ORBIT_SEGMENTS: usize = 100;
const MOON_ORBIT_SEGMENTS: usize = 50;
const MIN_STAR_RADIUS: f64 = 3.0;
const MIN_PLANET_RADIUS: f64 = 2.0;
const MIN_MOON_RADIUS: f64 = 1.5;
/// Shrink factor for a centered planet that would swallow its moons' orbits.
const CENTERED_SHRINK: f64 = 10.0;

/// Resting hit-area radius for a body drawn at `radius`.
pub fn hit_radius(radius: f64) -> f64 {
    (radius + 10.0).max(20.0)
}

/// Read-only view of everything a frame is drawn from.
pub struct Scene<'a> {
    pub system: &'a SolarSystem,
    pub states: &'a BodyStates,
    pub sim: &'a SimulationState,
    pub offset: Option<DVec3>,
    pub hover: &'a HoverAnimations,
    pub compositions: &'a CompositionTable,
    pub formulas: &'a FormulaRegistry,
    pub viewport: DVec2,
}

impl Scene<'_> {
    fn center(&self) -> DVec2 {
        self.viewport * 0.5
    }

    /// Screen position of a scene point under the current pan offset.
    pub fn to_screen(&self, point: DVec3) -> DVec2 {
        self.center() + self.sim.view.project(point, self.offset)
    }

    fn max_orbit_radius(&self) -> f64 {
        self.viewport.x.min(self.viewport.y) / 2.0
    }

    /// Rebuild `list` and `areas` for this frame.
    pub fn build(&self, list: &mut DisplayList<HitTag>, areas: &mut HitAreas) {
        list.clear();
        areas.clear();
        self.draw_axes(list);
        if self.sim.show_orbits {
            self.draw_planet_orbits(list);
        }
        self.draw_star(list);
        for planet in self.system.planets() {
            self.draw_body(planet, list, areas);
        }
        for planet in self.system.planets() {
            for &moon in &planet.moons {
                if let Some(moon) = self.system.get(moon) {
                    self.draw_moon(moon, list, areas);
                }
            }
        }
    }

    fn draw_axes(&self, list: &mut DisplayList<HitTag>) {
        let center = self.center();
        let font_size = self.sim.label_font_size * 0.7;
        let axes = [
            ("X", DVec3::X, "#FF4444"),
            ("Y", DVec3::Z, "#44FF44"),
            ("Z", DVec3::Y, "#4444FF"),
        ];
        for (name, direction, hex) in axes {
            let color = Color::from_hex(hex).unwrap_or(Color::WHITE);
            let tip = self.sim.view.project(direction * AXIS_LENGTH, None);
            list.push(
                layer::AXIS,
                Shape::line(center, center + tip, Stroke::new(color, 1.0)),
                AXIS_OPACITY,
            );
            let label_at = center + tip.normalize_or_zero() * (tip.length() + 5.0);
            let style = TextStyle::new(font_size, color).centered().bold();
            list.push(layer::AXIS, Shape::text(label_at, name, style), AXIS_OPACITY);
        }
    }

    fn orbit_shape(
        &self,
        body: &Body,
        segments: usize,
        around: DVec3,
        width: f64,
        alpha: f64,
    ) -> Option<Shape> {
        let orbit = body.orbit?;
        if orbit.distance * self.sim.scale > self.max_orbit_radius() {
            return None;
        }
        let points = orbit_ring(&orbit, self.sim.scale, segments, around)
            .into_iter()
            .map(|p| self.to_screen(p))
            .collect();
        Some(Shape::Polyline {
            points,
            closed: true,
            stroke: Stroke::new(body.color.with_alpha(alpha as f32), width),
            round_caps: false,
        })
    }

    fn draw_planet_orbits(&self, list: &mut DisplayList<HitTag>) {
        for planet in self.system.planets() {
            let Some(state) = self.states.get(planet.id).filter(|s| s.orbit_visible) else {
                continue;
            };
            if let Some(shape) = self.orbit_shape(
                planet,
                PLANET_ORBIT_SEGMENTS,
                DVec3::ZERO,
                1.0,
                0.2 * state.orbit_opacity,
            ) {
                list.push(layer::ORBITS, shape, 1.0);
            }
        }
    }

    fn draw_star(&self, list: &mut DisplayList<HitTag>) {
        let star = self.system.star();
        let Some(state) = self.states.get(star.id).filter(|s| s.visible) else {
            return;
        };
        let radius = (star.size * self.sim.scale).max(MIN_STAR_RADIUS);
        list.push(
            layer::PLANETS,
            Shape::Circle {
                center: self.to_screen(DVec3::ZERO),
                radius,
                fill: Some(star.color),
                stroke: star.stroke_color.map(|c| Stroke::new(c, 2.0)),
            },
            state.opacity as f32,
        );
    }

    /// A centered planet larger than its innermost moon orbit is drawn shrunk.
    fn planet_size(&self, planet: &Body) -> (f64, bool) {
        let centered = self.states.get(planet.id).is_some_and(|s| s.is_center);
        if !centered {
            return (planet.size, false);
        }
        let smallest_moon_orbit = planet
            .moons
            .iter()
            .filter_map(|&m| self.system.get(m).and_then(|m| m.orbit))
            .map(|o| o.distance)
            .fold(f64::INFINITY, f64::min);
        if planet.size * self.sim.scale > smallest_moon_orbit * self.sim.scale {
            (planet.size / CENTERED_SHRINK, true)
        } else {
            (planet.size, false)
        }
    }

    fn draw_body(&self, planet: &Body, list: &mut DisplayList<HitTag>, areas: &mut HitAreas) {
        let Some(state) = self.states.get(planet.id).filter(|s| s.visible) else {
            return;
        };
        let (size, shrunk) = self.planet_size(planet);
        let radius = (size * self.sim.scale).max(MIN_PLANET_RADIUS);
        let position = self.to_screen(self.system.position(planet.id, self.sim.time, self.sim.scale));
        self.draw_disc(planet, position, radius, 0.5, state.opacity, shrunk, list, areas);
    }

    fn draw_moon(&self, moon: &Body, list: &mut DisplayList<HitTag>, areas: &mut HitAreas) {
        let Some(state) = self.states.get(moon.id).filter(|s| s.visible) else {
            return;
        };
        let (time, scale) = (self.sim.time, self.sim.scale);
        if self.sim.show_orbits && state.orbit_visible {
            let parent = moon.parent.map_or(DVec3::ZERO, |p| self.system.position(p, time, scale));
            if let Some(shape) =
                self.orbit_shape(moon, MOON_ORBIT_SEGMENTS, parent, 0.5, 0.4 * state.orbit_opacity)
            {
                list.push(layer::MOONS, shape, 1.0);
            }
        }
        let radius = (moon.size * scale).max(MIN_MOON_RADIUS);
        let position = self.to_screen(self.system.position(moon.id, time, scale));
        self.draw_disc(moon, position, radius, 0.3, state.opacity, false, list, areas);
    }

    /// Body disc, its hit area, the composition ring and the label.
    #[allow(clippy::too_many_arguments)]
    fn draw_disc(
        &self,
        body: &Body,
        position: DVec2,
        radius: f64,
        stroke_width: f64,
        opacity: f64,
        shrunk: bool,
        list: &mut DisplayList<HitTag>,
        areas: &mut HitAreas,
    ) {
        let opacity32 = opacity as f32;
        let disc_layer = if body.kind == BodyKind::Planet {
            layer::PLANETS
        } else {
            layer::MOONS
        };
        list.push_tagged(
            disc_layer,
            Shape::Circle {
                center: position,
                radius,
                fill: Some(body.color),
                stroke: Some(Stroke::new(Color::WHITE, stroke_width)),
            },
            opacity32,
            HitTag::BodyShape(body.id),
        );

        let original_radius = hit_radius(radius);
        let hover = self.hover.get(body.id);
        let click_radius = hover.map_or(original_radius, |h| h.radius);
        let orbit_radius = body.orbit_radius(self.sim.scale);
        list.push_tagged(
            layer::CLICK_AREAS,
            Shape::Circle {
                center: position,
                radius: click_radius,
                fill: Some(Color::rgba(1.0, 1.0, 1.0, 0.01)),
                stroke: None,
            },
            opacity32,
            HitTag::HitArea(body.id),
        );
        areas.insert(HitArea {
            body: body.id,
            center: position,
            radius: click_radius,
            original_radius,
            orbit_radius,
        });

        if let Some(h) = hover.filter(|h| h.show_composition) {
            if let Some(compounds) = self.compositions.layer(&body.name, h.current_layer) {
                CompositionRing {
                    body: body.id,
                    center: position,
                    radius: click_radius,
                    progress: h.composition_progress().unwrap_or(0.0),
                    font_size: self.sim.label_font_size,
                    show_compound_names: self.sim.show_compound_names,
                }
                .draw(compounds, self.formulas, list);
            }
        }

        let suppressed = !self.hover.is_empty() && hover.is_none();
        if self.sim.show_labels && orbit_radius >= MIN_ORBIT_RADIUS_FOR_LABEL && !suppressed {
            self.draw_label(body, position, click_radius, shrunk, opacity32, list);
        }
    }

    fn draw_label(
        &self,
        body: &Body,
        position: DVec2,
        start_radius: f64,
        shrunk: bool,
        opacity: f32,
        list: &mut DisplayList<HitTag>,
    ) {
        let is_planet = body.kind == BodyKind::Planet;
        let target = if is_planet { layer::LABELS } else { layer::MOONS };
        let (first, second) = if is_planet { (10.0, 15.0) } else { (5.0, 10.0) };
        let direction = DVec2::from_angle(-PI / 3.0);

        let start = position + direction * start_radius;
        let elbow = start + direction * first;
        let end = elbow + DVec2::new(second, 0.0);
        list.push(
            target,
            Shape::Polyline {
                points: vec![start, elbow, end],
                closed: false,
                stroke: Stroke::new(Color::rgb(0.6, 0.6, 0.6), if is_planet { 0.5 } else { 0.3 }),
                round_caps: false,
            },
            opacity,
        );

        let font = self.sim.label_font_size;
        let anchor = end + if is_planet { DVec2::new(5.0, 3.0) } else { DVec2::new(3.0, 2.0) };
        let style = TextStyle::new(if is_planet { font } else { font * 0.8 }, Color::WHITE);
        let text = if shrunk {
            format!("{} (-10x)", body.name)
        } else {
            body.name.clone()
        };
        let label_right = text_bounds(anchor, &text, &style).max.x;
        list.push(target, Shape::text(anchor, text, style), opacity);

        if is_planet && !body.moons.is_empty() {
            list.push(
                target,
                Shape::text(
                    DVec2::new(label_right + 10.0, anchor.y),
                    format!("{} ⏾", body.moons.len()),
                    TextStyle::new(font * 0.8, Color::rgb(0.5, 0.5, 0.5)),
                ),
                opacity,
            );
        }

        let Some(hover) = self.hover.get(body.id) else {
            return;
        };
        if !self.compositions.contains(&body.name) {
            return;
        }
        let indicator_color = Color::from_hex("#999999").unwrap_or(Color::NEUTRAL_GRAY);
        list.push_tagged(
            layer::CLICK_AREAS,
            Shape::text(
                anchor + DVec2::new(10.0, font + 5.0),
                hover.current_layer.indicator(),
                TextStyle::new(font * 0.8, indicator_color),
            ),
            opacity,
            HitTag::LayerIndicator(body.id),
        );
    }

    /// Ids of bodies whose shapes ended up in the list, in paint order.
    pub fn drawn_bodies(list: &DisplayList<HitTag>) -> Vec<BodyId> {
        list.tags()
            .filter_map(|t| match t {
                HitTag::HitArea(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}
