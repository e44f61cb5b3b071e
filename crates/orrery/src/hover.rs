//! Pointer hover resolution.
//!
//! Every interactive shape in the display list carries a [`HitTag`] naming
//! the body it belongs to. A hit on any of them resolves through the
//! [`HitAreas`] index to that body's hit area, so a body, its hit circle and
//! its composition ring all count as one hover target.

use std::collections::HashMap;
use std::time::Duration;

use engine_core::DVec2;

use crate::hover_anim::HoverAnimations;
use crate::system::BodyId;

/// Pointer tolerance for hit-tests, px.
pub const HOVER_TOLERANCE: f64 = 5.0;
/// Bodies whose on-screen orbit is smaller than this get no label and no hover.
pub const MIN_ORBIT_RADIUS_FOR_LABEL: f64 = 70.0;

/// What an interactive shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTag {
    /// The invisible circle registered around a body.
    HitArea(BodyId),
    /// The body's visible disc.
    BodyShape(BodyId),
    /// A ring segment, label or backdrop of the composition overlay.
    CompositionElement(BodyId),
    /// The clickable material-layer caption.
    LayerIndicator(BodyId),
}

impl HitTag {
    pub fn body(self) -> BodyId {
        match self {
            HitTag::HitArea(id)
            | HitTag::BodyShape(id)
            | HitTag::CompositionElement(id)
            | HitTag::LayerIndicator(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitArea {
    pub body: BodyId,
    pub center: DVec2,
    /// Radius as drawn this frame, including any hover animation.
    pub radius: f64,
    /// Resting radius.
    pub original_radius: f64,
    /// On-screen radius of the body's orbit.
    pub orbit_radius: f64,
}

/// Hit areas drawn in the current frame, by body.
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    areas: HashMap<BodyId, HitArea>,
}

impl HitAreas {
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn insert(&mut self, area: HitArea) {
        self.areas.insert(area.body, area);
    }

    pub fn get(&self, id: BodyId) -> Option<&HitArea> {
        self.areas.get(&id)
    }

    /// The hit area a tagged shape belongs to.
    pub fn resolve(&self, tag: HitTag) -> Option<&HitArea> {
        self.get(tag.body())
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    /// Nothing hovered before or after.
    None,
    /// Still over the same body.
    Continued(BodyId),
    Entered(BodyId),
    Left(BodyId),
    Switched { from: BodyId, to: BodyId },
}

/// Owns the single "currently hovered" body.
#[derive(Debug, Clone, Default)]
pub struct HoverResolver {
    hovered: Option<BodyId>,
}

impl HoverResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<BodyId> {
        self.hovered
    }

    pub fn is_hovering(&self) -> bool {
        self.hovered.is_some()
    }

    /// Apply the hit found under the pointer, starting radius animations as needed.
    pub fn resolve(
        &mut self,
        found: Option<HitTag>,
        areas: &HitAreas,
        anims: &mut HoverAnimations,
        now: Duration,
    ) -> HoverChange {
        let candidate = found.and_then(|tag| areas.resolve(tag));

        if let (Some(current), Some(area)) = (self.hovered, candidate) {
            if area.body == current {
                return HoverChange::Continued(current);
            }
        }

        let previous = self.hovered.take();
        if let Some(prev) = previous {
            anims.contract(prev, now);
            anims.hide_composition(prev);
        }

        let entered = candidate
            .filter(|area| area.orbit_radius >= MIN_ORBIT_RADIUS_FOR_LABEL)
            .map(|area| {
                anims.expand(area.body, area.original_radius, now);
                area.body
            });
        self.hovered = entered;

        match (previous, entered) {
            (None, None) => HoverChange::None,
            (None, Some(to)) => HoverChange::Entered(to),
            (Some(from), None) => HoverChange::Left(from),
            (Some(from), Some(to)) => HoverChange::Switched { from, to },
        }
    }
}
