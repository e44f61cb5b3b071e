//! Drawing backends.
//!
//! A [`Canvas`] receives the primitives of a [`DisplayList`](crate::DisplayList)
//! in paint order. Windowed front ends implement it over their graphics API;
//! [`CountingCanvas`] is the headless backend used by the demo binary and tests.

use engine_core::Color;
use glam::DVec2;

use crate::shape::{Bounds, Shape, Stroke, TextStyle};

pub trait Canvas {
    /// Called before the first primitive of a frame.
    fn begin_frame(&mut self) {}

    fn circle(
        &mut self,
        center: DVec2,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
        opacity: f32,
    );

    fn polyline(&mut self, points: &[DVec2], closed: bool, stroke: Stroke, round_caps: bool, opacity: f32);

    fn text(&mut self, anchor: DVec2, content: &str, style: &TextStyle, opacity: f32);

    fn rect(&mut self, bounds: Bounds, fill: Color, opacity: f32);

    /// Called after the last primitive of a frame.
    fn end_frame(&mut self) {}

    /// Dispatch one shape to the matching primitive.
    fn draw_shape(&mut self, shape: &Shape, opacity: f32) {
        match shape {
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
            } => self.circle(*center, *radius, *fill, *stroke, opacity),
            Shape::Polyline {
                points,
                closed,
                stroke,
                round_caps,
            } => self.polyline(points, *closed, *stroke, *round_caps, opacity),
            Shape::Text {
                anchor,
                content,
                style,
            } => self.text(*anchor, content, style, opacity),
            Shape::Rect { bounds, fill } => self.rect(*bounds, *fill, opacity),
        }
    }
}

/// Headless backend that tallies what it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct CountingCanvas {
    pub frames: u64,
    pub circles: usize,
    pub polylines: usize,
    pub texts: usize,
    pub rects: usize,
    /// Text content of the most recent frame.
    pub last_frame_text: Vec<String>,
}

impl CountingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitives drawn across all frames.
    pub fn total(&self) -> usize {
        self.circles + self.polylines + self.texts + self.rects
    }
}

impl Canvas for CountingCanvas {
    fn begin_frame(&mut self) {
        self.last_frame_text.clear();
    }

    fn circle(&mut self, _: DVec2, _: f64, _: Option<Color>, _: Option<Stroke>, _: f32) {
        self.circles += 1;
    }

    fn polyline(&mut self, _: &[DVec2], _: bool, _: Stroke, _: bool, _: f32) {
        self.polylines += 1;
    }

    fn text(&mut self, _: DVec2, content: &str, _: &TextStyle, _: f32) {
        self.texts += 1;
        self.last_frame_text.push(content.to_string());
    }

    fn rect(&mut self, _: Bounds, _: Color, _: f32) {
        self.rects += 1;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        log::trace!(
            "frame {} drawn: {} primitives so far",
            self.frames,
            self.total()
        );
    }
}
