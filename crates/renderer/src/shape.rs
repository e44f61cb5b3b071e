//! 2D primitives and their geometry (bounds, hit-testing).

use engine_core::Color;
use glam::DVec2;

/// Monospace glyph advance as a fraction of font size.
const GLYPH_ADVANCE: f64 = 0.6;
/// Ascent above the baseline as a fraction of font size.
const ASCENT: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub color: Color,
    pub align: TextAlign,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(font_size: f64, color: Color) -> Self {
        Self {
            font_size,
            color,
            align: TextAlign::Left,
            bold: false,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        Self::new(center - size * 0.5, center + size * 0.5)
    }

    pub fn expand(self, by: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(by),
            max: self.max + DVec2::splat(by),
        }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// Estimated bounds of a single line of monospace text anchored at its baseline.
pub fn text_bounds(anchor: DVec2, content: &str, style: &TextStyle) -> Bounds {
    let width = content.chars().count() as f64 * style.font_size * GLYPH_ADVANCE;
    let left = match style.align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - width * 0.5,
    };
    Bounds::new(
        DVec2::new(left, anchor.y - style.font_size * ASCENT),
        DVec2::new(left + width, anchor.y + style.font_size * (1.0 - ASCENT)),
    )
}

/// A drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: DVec2,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Polyline {
        points: Vec<DVec2>,
        closed: bool,
        stroke: Stroke,
        round_caps: bool,
    },
    Text {
        anchor: DVec2,
        content: String,
        style: TextStyle,
    },
    Rect {
        bounds: Bounds,
        fill: Color,
    },
}

impl Shape {
    pub fn line(from: DVec2, to: DVec2, stroke: Stroke) -> Self {
        Shape::Polyline {
            points: vec![from, to],
            closed: false,
            stroke,
            round_caps: false,
        }
    }

    pub fn text(anchor: DVec2, content: impl Into<String>, style: TextStyle) -> Self {
        Shape::Text {
            anchor,
            content: content.into(),
            style,
        }
    }

    /// Visual position: circle center, text anchor, rect center, first point.
    pub fn position(&self) -> DVec2 {
        match self {
            Shape::Circle { center, .. } => *center,
            Shape::Polyline { points, .. } => points.first().copied().unwrap_or(DVec2::ZERO),
            Shape::Text { anchor, .. } => *anchor,
            Shape::Rect { bounds, .. } => bounds.center(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Circle { center, radius, .. } => {
                Bounds::from_center(*center, DVec2::splat(radius * 2.0))
            }
            Shape::Polyline { points, .. } => {
                let mut min = DVec2::splat(f64::INFINITY);
                let mut max = DVec2::splat(f64::NEG_INFINITY);
                for p in points {
                    min = min.min(*p);
                    max = max.max(*p);
                }
                if points.is_empty() {
                    Bounds::new(DVec2::ZERO, DVec2::ZERO)
                } else {
                    Bounds::new(min, max)
                }
            }
            Shape::Text {
                anchor,
                content,
                style,
            } => text_bounds(*anchor, content, style),
            Shape::Rect { bounds, .. } => *bounds,
        }
    }

    /// Whether `p` touches the shape's fill or stroke within `tolerance` px.
    pub fn hit(&self, p: DVec2, tolerance: f64) -> bool {
        match self {
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let d = p.distance(*center);
                let in_fill = fill.is_some() && d <= radius + tolerance;
                let on_stroke = stroke
                    .map(|s| (d - radius).abs() <= s.width * 0.5 + tolerance)
                    .unwrap_or(false);
                in_fill || on_stroke
            }
            Shape::Polyline {
                points,
                closed,
                stroke,
                ..
            } => {
                let reach = stroke.width * 0.5 + tolerance;
                let n = points.len();
                if n == 1 {
                    return p.distance(points[0]) <= reach;
                }
                let segments = points.windows(2).map(|w| (w[0], w[1]));
                let closing = (*closed && n > 2).then(|| (points[n - 1], points[0]));
                segments
                    .chain(closing)
                    .any(|(a, b)| distance_to_segment(p, a, b) <= reach)
            }
            Shape::Text { .. } | Shape::Rect { .. } => self.bounds().expand(tolerance).contains(p),
        }
    }
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
