//! Companion view: nearby stars around the Sun, slowly spinning.

use std::time::Duration;

use catalogue::{CatalogueStar, StarField, PARSECS_TO_LY};
use engine_core::{Color, DVec2, DVec3, ViewTransform};
use input::{InputState, PointerRelease, PointerSample, ViewAngles};
use renderer::{Canvas, DisplayList, Layer, Shape, Stroke, TextStyle};

/// Auto-rotation speed, degrees per second.
pub const ROTATION_SPEED: f64 = 5.0;
pub const PINCH_SENSITIVITY: f64 = 0.01;
pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 50.0;
/// Stars brighter than this magnitude get a glow.
const GLOW_MAGNITUDE: f64 = 2.0;
const AXIS_LENGTH: f64 = 50.0;
const AXIS_FONT_SIZE: f64 = 10.0;

const AXES: Layer = 0;
const STARS: Layer = 1;

/// Display radius for an apparent magnitude: 0.5 px (faint) to 3 px (bright).
pub fn star_size(mag: f64) -> f64 {
    let normalized = ((6.0 - mag) / 7.0).clamp(0.0, 1.0);
    0.5 + normalized * 2.5
}

/// Color from the B−V index: blue below zero, white to 0.5, then orange to red.
pub fn star_color(ci: f64) -> Color {
    let (r, g, b) = if ci < 0.0 {
        (0.6 + ci * 0.5, 0.7 + ci * 0.3, 1.0)
    } else if ci < 0.5 {
        let t = ci / 0.5;
        (0.9 + t * 0.1, 0.9 - t * 0.1, 1.0 - t * 0.3)
    } else {
        let t = ((ci - 0.5) / 1.0).min(1.0);
        (1.0, 0.8 - t * 0.5, 0.7 - t * 0.6)
    };
    Color::rgb(r as f32, g as f32, b as f32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarMapSummary {
    pub visible: usize,
    pub total: usize,
}

pub struct StarMap {
    /// Distance limit, light years.
    pub max_distance: f64,
    pub view: ViewTransform,
    /// Pixels per light year.
    pub scale: f64,
    pub auto_rotate: bool,
    field: StarField,
    input: InputState,
    /// Star shapes are tagged with their index in the field.
    list: DisplayList<usize>,
    viewport: DVec2,
    last_tick: Option<Duration>,
    dirty: bool,
}

impl StarMap {
    pub fn new(field: StarField, viewport: DVec2) -> Self {
        log::info!("star map ready: {} stars", field.len());
        Self {
            max_distance: 15.0,
            view: ViewTransform::new(60.0, 0.0),
            scale: 10.0,
            auto_rotate: true,
            field,
            input: InputState::new(),
            list: DisplayList::new(),
            viewport,
            last_tick: None,
            dirty: true,
        }
    }

    pub fn field(&self) -> &StarField {
        &self.field
    }

    pub fn display_list(&self) -> &DisplayList<usize> {
        &self.list
    }

    pub fn set_max_distance(&mut self, ly: f64) {
        self.max_distance = ly.max(0.0);
        self.dirty = true;
    }

    pub fn toggle_auto_rotation(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width, height);
        self.dirty = true;
    }

    pub fn summary(&self) -> StarMapSummary {
        StarMapSummary {
            visible: self.field.within(self.max_distance).count(),
            total: self.field.len(),
        }
    }

    /// Spin (unless a gesture holds the view) and repaint if anything moved.
    pub fn tick<C: Canvas + ?Sized>(&mut self, now: Duration, canvas: &mut C) -> bool {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_tick = Some(now);

        let held = self.input.is_dragging() || self.input.is_pinching();
        if self.auto_rotate && !held && !dt.is_zero() {
            self.view.rotation =
                (self.view.rotation + ROTATION_SPEED * dt.as_secs_f64()).rem_euclid(360.0);
            self.dirty = true;
        }

        if !self.dirty {
            return false;
        }
        self.rebuild();
        self.list.replay(canvas);
        self.dirty = false;
        true
    }

    // ── Pointer input ──────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, sample: &PointerSample) {
        let view = ViewAngles {
            inclination: self.view.inclination,
            rotation: self.view.rotation,
        };
        self.input.pointer_down(sample, view);
    }

    pub fn pointer_move(&mut self, sample: &PointerSample) {
        let motion = self.input.pointer_move(sample);
        if let Some(delta) = motion.pinch_delta {
            self.scale = (self.scale + delta * PINCH_SENSITIVITY).clamp(MIN_SCALE, MAX_SCALE);
            self.dirty = true;
        }
        if let Some(angles) = motion.drag {
            self.view.inclination = angles.inclination;
            self.view.rotation = angles.rotation;
            self.dirty = true;
        }
    }

    /// Release; a click returns the star under the pointer, if any.
    pub fn pointer_up(&mut self, sample: &PointerSample) -> Option<CatalogueStar> {
        match self.input.pointer_up(sample) {
            PointerRelease::Click(at) => self.star_at(at).copied(),
            PointerRelease::GestureEnd | PointerRelease::Ignored => None,
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.input.pointer_cancel();
    }

    pub fn star_at(&self, point: DVec2) -> Option<&CatalogueStar> {
        let hit = self.list.hit_test(point, 2.0)?;
        self.field.stars.get(hit.tag)
    }

    // ── Drawing ────────────────────────────────────────────────────────────

    fn center(&self) -> DVec2 {
        self.viewport * 0.5
    }

    /// Screen position of a catalogue star.
    pub fn to_screen(&self, star: &CatalogueStar) -> DVec2 {
        let p = star.position_pc() * PARSECS_TO_LY * self.scale;
        self.center() + self.view.project(p, None)
    }

    fn rebuild(&mut self) {
        let mut list = std::mem::take(&mut self.list);
        list.clear();
        self.draw_axes(&mut list);

        for (index, star) in self.field.stars.iter().enumerate() {
            if star.dist <= 0.0 || star.dist > self.max_distance {
                continue;
            }
            let position = self.to_screen(star);
            let size = star_size(star.mag);
            let color = star_color(star.ci);
            if star.mag < GLOW_MAGNITUDE {
                list.push(
                    STARS,
                    Shape::Circle {
                        center: position,
                        radius: size * 2.0,
                        fill: Some(color.with_alpha(0.2)),
                        stroke: None,
                    },
                    1.0,
                );
            }
            list.push_tagged(
                STARS,
                Shape::Circle {
                    center: position,
                    radius: size,
                    fill: Some(color),
                    stroke: Some(Stroke::new(color, 0.5)),
                },
                1.0,
                index,
            );
        }
        self.list = list;
    }

    fn draw_axes(&self, list: &mut DisplayList<usize>) {
        let center = self.center();
        let axes = [
            ("X", DVec3::X, Color::rgb(1.0, 0.267, 0.267)),
            ("Y", DVec3::Z, Color::rgb(0.267, 1.0, 0.267)),
            ("Z", DVec3::Y, Color::rgb(0.267, 0.267, 1.0)),
        ];
        for (name, direction, color) in axes {
            let tip = self.view.project(direction * AXIS_LENGTH, None);
            list.push(AXES, Shape::line(center, center + tip, Stroke::new(color, 1.0)), 0.7);
            let label_at = center + tip.normalize_or_zero() * (tip.length() + 10.0);
            let style = TextStyle::new(AXIS_FONT_SIZE, color).centered().bold();
            list.push(AXES, Shape::text(label_at, name, style), 0.7);
        }
    }
}
