//! Per-body visibility, opacity and center flags.
//!
//! Each frame the store derives target opacities from whichever body is (or
//! is about to become) the center, then fades every current value one fixed
//! step toward its target. Visibility is read back from opacity and is never
//! set on its own.

use engine_core::step_toward;

use crate::system::{BodyId, BodyKind, SolarSystem};

/// Opacity change per frame.
pub const FADE_STEP: f64 = 0.05;
/// Opacity of a moon's parent while the moon is centered.
pub const CENTERED_MOON_PARENT_OPACITY: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub kind: BodyKind,
    pub parent: Option<BodyId>,
    pub is_center: bool,
    pub is_center_target: bool,
    pub visible: bool,
    pub target_visible: bool,
    pub opacity: f64,
    pub target_opacity: f64,
    pub orbit_visible: bool,
    pub target_orbit_visible: bool,
    pub orbit_opacity: f64,
    pub target_orbit_opacity: f64,
}

impl BodyState {
    fn initial(kind: BodyKind, parent: Option<BodyId>) -> Self {
        let (opacity, orbit_opacity) = match kind {
            BodyKind::Star => (1.0, 0.0),
            BodyKind::Planet => (1.0, 1.0),
            BodyKind::Moon => (0.0, 0.0),
        };
        Self {
            kind,
            parent,
            is_center: kind == BodyKind::Star,
            is_center_target: false,
            visible: opacity > 0.0,
            target_visible: opacity > 0.0,
            opacity,
            target_opacity: opacity,
            orbit_visible: orbit_opacity > 0.0,
            target_orbit_visible: orbit_opacity > 0.0,
            orbit_opacity,
            target_orbit_opacity: orbit_opacity,
        }
    }

    fn set_targets(&mut self, opacity: f64, orbit_opacity: f64) {
        self.target_opacity = opacity;
        self.target_visible = opacity > 0.0;
        self.target_orbit_opacity = orbit_opacity;
        self.target_orbit_visible = orbit_opacity > 0.0;
    }

    /// One fade step toward the targets. Returns whether anything moved.
    fn fade(&mut self) -> bool {
        let (opacity, body_changed) = step_toward(self.opacity, self.target_opacity, FADE_STEP);
        let (orbit, orbit_changed) =
            step_toward(self.orbit_opacity, self.target_orbit_opacity, FADE_STEP);
        self.opacity = opacity;
        self.orbit_opacity = orbit;
        self.visible = self.opacity > 0.0;
        self.orbit_visible = self.orbit_opacity > 0.0;
        body_changed || orbit_changed
    }
}

/// `(opacity, orbit opacity)` targets for `body` given the effective center.
fn targets_for(
    state: &BodyState,
    id: BodyId,
    center: BodyId,
    center_kind: BodyKind,
    center_parent: Option<BodyId>,
) -> (f64, f64) {
    match center_kind {
        BodyKind::Star => match state.kind {
            BodyKind::Star => (1.0, 0.0),
            BodyKind::Planet => (1.0, 1.0),
            BodyKind::Moon => (0.0, 0.0),
        },
        BodyKind::Planet => {
            if id == center {
                (1.0, 0.0)
            } else if state.kind == BodyKind::Moon && state.parent == Some(center) {
                (1.0, 1.0)
            } else {
                (0.0, 0.0)
            }
        }
        BodyKind::Moon => {
            if id == center {
                (1.0, 0.0)
            } else if state.kind == BodyKind::Planet && Some(id) == center_parent {
                (CENTERED_MOON_PARENT_OPACITY, 0.0)
            } else if state.kind == BodyKind::Moon
                && state.parent.is_some()
                && state.parent == center_parent
            {
                // Siblings keep their orbits so the parent system stays readable.
                (1.0, 1.0)
            } else {
                (0.0, 0.0)
            }
        }
    }
}

/// States for every body, indexed by [`BodyId`].
#[derive(Debug, Clone)]
pub struct BodyStates {
    states: Vec<BodyState>,
}

impl BodyStates {
    pub fn new(system: &SolarSystem) -> Self {
        Self {
            states: system
                .iter()
                .map(|body| BodyState::initial(body.kind, body.parent))
                .collect(),
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyState> {
        self.states.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (BodyId::from_index(i), s))
    }

    /// The body flagged as the settled center.
    pub fn center(&self) -> Option<BodyId> {
        self.iter().find(|(_, s)| s.is_center).map(|(id, _)| id)
    }

    /// Retarget every body for `center` and fade one step.
    ///
    /// `center` is the transition target while one is in flight, else the
    /// current center. `settled` is true when no transition is running; only
    /// then does `is_center` move. Returns whether any opacity changed.
    pub fn update(&mut self, center: BodyId, settled: bool) -> bool {
        let Some(center_state) = self.get(center) else {
            return false;
        };
        let center_kind = center_state.kind;
        let center_parent = center_state.parent;

        let mut any_changing = false;
        for (i, state) in self.states.iter_mut().enumerate() {
            let id = BodyId::from_index(i);
            state.is_center_target = id == center;
            if settled {
                state.is_center = state.is_center_target;
            }
            let (opacity, orbit_opacity) = targets_for(state, id, center, center_kind, center_parent);
            state.set_targets(opacity, orbit_opacity);
            any_changing |= state.fade();
        }
        any_changing
    }
}
