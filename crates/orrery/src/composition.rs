//! The composition ring drawn around a hovered body.

use std::f64::consts::{FRAC_PI_2, TAU};

use catalogue::{format_formula, Compound, FormulaRegistry};
use engine_core::{Color, DVec2};
use renderer::{text_bounds, Bounds, DisplayList, Shape, Stroke, TextStyle};

use crate::hover::HitTag;
use crate::scene::layer;
use crate::system::BodyId;

pub const RING_WIDTH: f64 = 5.0;
/// Points per arc segment, including both ends.
const ARC_POINTS: usize = 31;
/// Sweep progress after which segment labels appear.
const LABEL_THRESHOLD: f64 = 0.8;

/// One ring around one body's hit area.
#[derive(Debug, Clone, Copy)]
pub struct CompositionRing {
    pub body: BodyId,
    pub center: DVec2,
    /// Hit-area radius; the ring sits on its border.
    pub radius: f64,
    /// Eased sweep progress in `[0, 1]`.
    pub progress: f64,
    pub font_size: f64,
    pub show_compound_names: bool,
}

/// Start and end angles of each compound, clockwise from 12 o'clock.
pub fn segment_angles(compounds: &[Compound]) -> Vec<(f64, f64)> {
    let mut start = -FRAC_PI_2;
    compounds
        .iter()
        .map(|c| {
            let end = start + c.percent / 100.0 * TAU;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

impl CompositionRing {
    /// Add the ring, its backdrop and (late in the sweep) its labels.
    pub fn draw(
        &self,
        compounds: &[Compound],
        formulas: &FormulaRegistry,
        list: &mut DisplayList<HitTag>,
    ) {
        if compounds.is_empty() {
            return;
        }
        let tag = HitTag::CompositionElement(self.body);
        let r = self.radius;

        // Near-invisible backdrop keeps the pointer in the hover group while
        // it travels over the labels.
        let backdrop = Bounds::from_center(
            DVec2::new(self.center.x + r * 1.5, self.center.y),
            DVec2::splat(r * 3.0),
        );
        list.push_tagged(
            layer::CLICK_AREAS,
            Shape::Rect {
                bounds: backdrop,
                fill: Color::rgba(0.0, 0.0, 0.0, 0.01),
            },
            1.0,
            tag,
        );

        let progress = self.progress.clamp(0.0, 1.0);
        let draw_angle = -FRAC_PI_2 + TAU * progress;
        let spans = segment_angles(compounds);

        for (compound, &(start, end)) in compounds.iter().zip(&spans) {
            if draw_angle <= start {
                break;
            }
            let end = end.min(draw_angle);
            let points = (0..ARC_POINTS)
                .map(|i| {
                    let a = start + (end - start) * i as f64 / (ARC_POINTS - 1) as f64;
                    self.center + DVec2::new(a.cos(), a.sin()) * r
                })
                .collect();
            list.push_tagged(
                layer::CLICK_AREAS,
                Shape::Polyline {
                    points,
                    closed: false,
                    stroke: Stroke::new(formulas.color(&compound.formula), RING_WIDTH),
                    round_caps: true,
                },
                1.0,
                tag,
            );
        }

        if progress <= LABEL_THRESHOLD {
            return;
        }
        let label_radius = r + self.font_size + 5.0;
        for (compound, &(start, end)) in compounds.iter().zip(&spans) {
            if draw_angle <= start {
                break;
            }
            let text = if self.show_compound_names {
                compound.compound.clone()
            } else {
                format_formula(&compound.formula)
            };
            if text.is_empty() {
                continue;
            }
            let mid = (start + end) / 2.0;
            let anchor = self.center + DVec2::new(mid.cos(), mid.sin()) * label_radius;
            let style = TextStyle::new(self.font_size * 0.8, formulas.color(&compound.formula))
                .centered();

            list.push_tagged(
                layer::CLICK_AREAS,
                Shape::Rect {
                    bounds: text_bounds(anchor, &text, &style).expand(2.0),
                    fill: Color::rgba(0.0, 0.0, 0.0, 0.5),
                },
                1.0,
                tag,
            );
            list.push_tagged(
                layer::CLICK_AREAS,
                Shape::text(anchor, text, style),
                progress as f32,
                tag,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compounds() -> Vec<Compound> {
        [("Silica", 50.0, "SiO2"), ("Iron", 30.0, "Fe"), ("Water", 20.0, "H2O")]
            .into_iter()
            .map(|(name, percent, formula)| Compound {
                compound: name.to_string(),
                percent,
                formula: formula.to_string(),
            })
            .collect()
    }

    fn ring(progress: f64) -> CompositionRing {
        CompositionRing {
            body: BodyId::from_index(3),
            center: DVec2::new(100.0, 100.0),
            radius: 40.0,
            progress,
            font_size: 12.0,
            show_compound_names: false,
        }
    }

    fn texts(list: &DisplayList<HitTag>) -> Vec<String> {
        list.iter()
            .filter_map(|(_, item)| match &item.shape {
                Shape::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn spans_follow_percentages_from_twelve_oclock() {
        let spans = segment_angles(&compounds());
        assert!((spans[0].0 + FRAC_PI_2).abs() < 1e-12);
        assert!((spans[0].1 - spans[0].0 - std::f64::consts::PI).abs() < 1e-12);
        assert!((spans[2].1 - (TAU - FRAC_PI_2)).abs() < 1e-12);
    }

    #[test]
    fn partial_sweep_draws_leading_segments_only() {
        let formulas = FormulaRegistry::builtin().unwrap();
        let mut list = DisplayList::new();
        ring(0.6).draw(&compounds(), &formulas, &mut list);
        // Backdrop plus two arcs; no labels before 80%.
        assert_eq!(list.len(), 3);
        assert!(texts(&list).is_empty());
        assert!(list
            .tags()
            .all(|t| t == HitTag::CompositionElement(BodyId::from_index(3))));
    }

    #[test]
    fn labels_appear_late_in_the_sweep() {
        let formulas = FormulaRegistry::builtin().unwrap();
        let mut list = DisplayList::new();
        ring(0.9).draw(&compounds(), &formulas, &mut list);
        assert_eq!(texts(&list), vec!["SiO₂", "Fe", "H₂O"]);

        let mut names = ring(1.0);
        names.show_compound_names = true;
        let mut list = DisplayList::new();
        names.draw(&compounds(), &formulas, &mut list);
        assert_eq!(texts(&list), vec!["Silica", "Iron", "Water"]);
    }

    #[test]
    fn arcs_sit_on_the_hit_area_border() {
        let formulas = FormulaRegistry::builtin().unwrap();
        let mut list = DisplayList::new();
        ring(1.0).draw(&compounds(), &formulas, &mut list);
        for (_, item) in list.iter() {
            if let Shape::Polyline { points, .. } = &item.shape {
                assert_eq!(points.len(), ARC_POINTS);
                for p in points {
                    assert!((p.distance(DVec2::new(100.0, 100.0)) - 40.0).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn nothing_without_data() {
        let formulas = FormulaRegistry::builtin().unwrap();
        let mut list = DisplayList::new();
        ring(1.0).draw(&[], &formulas, &mut list);
        assert!(list.is_empty());
    }
}
