//! The orrery context: one owned value holding every piece of engine state.
//!
//! Pointer handlers, the frame driver and the controls adapter all operate
//! on the same [`Orrery`]; nothing keeps a second copy of the view settings.

use std::time::Duration;

use anyhow::Context;
use catalogue::{CompositionTable, FormulaRegistry, StarSystem};
use engine_core::DVec2;
use input::{InputState, PointerRelease, PointerSample, ViewAngles};
use renderer::DisplayList;

use crate::body_state::BodyStates;
use crate::center::CenterTransition;
use crate::config::OrreryConfig;
use crate::hover::{HitAreas, HitTag, HoverChange, HoverResolver, HOVER_TOLERANCE};
use crate::hover_anim::HoverAnimations;
use crate::scene::Scene;
use crate::simulation::{SimulationState, ViewMode};
use crate::system::{BodyId, SolarSystem};

pub struct Orrery {
    pub(crate) system: SolarSystem,
    pub(crate) compositions: CompositionTable,
    pub(crate) formulas: FormulaRegistry,
    pub(crate) sim: SimulationState,
    pub(crate) center: CenterTransition,
    pub(crate) states: BodyStates,
    pub(crate) resolver: HoverResolver,
    pub(crate) hover: HoverAnimations,
    pub(crate) input: InputState,
    pub(crate) list: DisplayList<HitTag>,
    pub(crate) areas: HitAreas,
    pub(crate) viewport: DVec2,
    /// Something outside the animations changed; redraw next frame.
    pub(crate) dirty: bool,
    /// Frame time of the latest tick; input handlers stamp animations with it.
    pub(crate) now: Duration,
}

impl Orrery {
    pub fn new(
        config: &OrreryConfig,
        catalogue: &StarSystem,
        compositions: CompositionTable,
        formulas: FormulaRegistry,
    ) -> Self {
        let system = SolarSystem::new(catalogue);
        let states = BodyStates::new(&system);
        log::info!(
            "orrery ready: {} bodies, {} compositions",
            system.len(),
            compositions.len()
        );
        let mut orrery = Self {
            system,
            compositions,
            formulas,
            sim: SimulationState::from_config(config),
            center: CenterTransition::new(),
            states,
            resolver: HoverResolver::new(),
            hover: HoverAnimations::new(),
            input: InputState::new(),
            list: DisplayList::new(),
            areas: HitAreas::default(),
            viewport: DVec2::new(config.viewport_width as f64, config.viewport_height as f64),
            dirty: true,
            now: Duration::ZERO,
        };
        orrery.rebuild();
        orrery
    }

    /// Engine over the built-in Sol catalogue and tables.
    pub fn with_builtin_data(config: &OrreryConfig) -> anyhow::Result<Self> {
        let catalogue = StarSystem::sol().context("loading the built-in star system")?;
        let compositions =
            CompositionTable::builtin().context("loading the built-in composition table")?;
        let formulas = FormulaRegistry::builtin().context("loading the formula registry")?;
        Ok(Self::new(config, &catalogue, compositions, formulas))
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn sim(&self) -> &SimulationState {
        &self.sim
    }

    pub fn body_states(&self) -> &BodyStates {
        &self.states
    }

    pub fn center(&self) -> &CenterTransition {
        &self.center
    }

    pub fn hover_animations(&self) -> &HoverAnimations {
        &self.hover
    }

    pub fn hovered(&self) -> Option<BodyId> {
        self.resolver.hovered()
    }

    pub fn display_list(&self) -> &DisplayList<HitTag> {
        &self.list
    }

    pub fn hit_areas(&self) -> &HitAreas {
        &self.areas
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    pub fn compositions(&self) -> &CompositionTable {
        &self.compositions
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    // ── Commands ───────────────────────────────────────────────────────────

    /// Re-center on `id`. Ignored when it already is the center.
    pub fn set_center(&mut self, id: BodyId) {
        if self.system.get(id).is_none() {
            log::warn!("set_center: unknown body {:?}", id);
            return;
        }
        let before = self.center.target();
        if self.center.set_center(id, self.now) {
            log::info!("centering on {}", self.system.name(id));
        }
        if self.center.target() != before {
            self.dirty = true;
        }
        self.sim.view_mode = if self.center.effective().is_star() {
            ViewMode::SolarSystem
        } else {
            ViewMode::PlanetMoons
        };
    }

    /// Re-center on a body by name.
    pub fn set_center_by_name(&mut self, name: &str) -> bool {
        match self.system.id_of(name) {
            Some(id) => {
                self.set_center(id);
                true
            }
            None => false,
        }
    }

    pub fn set_view(&mut self, angles: ViewAngles) {
        self.sim.view.inclination = angles.inclination;
        self.sim.view.rotation = angles.rotation;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.sim.scale = scale;
        self.dirty = true;
    }

    pub fn set_time_speed(&mut self, speed: f64) {
        self.sim.time_speed = speed;
    }

    pub fn set_show_orbits(&mut self, on: bool) {
        self.sim.show_orbits = on;
        self.dirty = true;
    }

    pub fn set_show_labels(&mut self, on: bool) {
        self.sim.show_labels = on;
        self.dirty = true;
    }

    pub fn set_show_compound_names(&mut self, on: bool) {
        self.sim.show_compound_names = on;
        self.dirty = true;
    }

    pub fn set_label_font_size(&mut self, size: f64) {
        self.sim.label_font_size = size.max(1.0);
        self.dirty = true;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.sim.paused = !self.sim.paused;
        log::info!("{}", if self.sim.paused { "paused" } else { "resumed" });
        self.sim.paused
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width, height);
        self.dirty = true;
    }

    /// Show the next material layer of a hovered body.
    pub fn cycle_layer(&mut self, id: BodyId) {
        let name = self.system.name(id).to_string();
        if self
            .hover
            .cycle_layer(id, &name, &self.compositions, self.now)
            .is_some()
        {
            self.dirty = true;
        }
    }

    // ── Pointer input ──────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, sample: &PointerSample) {
        let view = ViewAngles {
            inclination: self.sim.view.inclination,
            rotation: self.sim.view.rotation,
        };
        self.input.pointer_down(sample, view);
    }

    /// Hover resolution on every move, then view steering while dragging.
    pub fn pointer_move(&mut self, sample: &PointerSample) -> HoverChange {
        let motion = self.input.pointer_move(sample);
        let change = match motion.position {
            Some(p) => self.hover_at(p),
            None => HoverChange::None,
        };
        if let Some(angles) = motion.drag {
            self.set_view(angles);
        }
        change
    }

    pub fn pointer_up(&mut self, sample: &PointerSample) {
        if let PointerRelease::Click(at) = self.input.pointer_up(sample) {
            self.click_at(at);
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.input.pointer_cancel();
    }

    /// Resolve hover for a canvas point against the last drawn frame.
    pub fn hover_at(&mut self, point: DVec2) -> HoverChange {
        let found = self.list.hit_test(point, HOVER_TOLERANCE).map(|hit| hit.tag);
        let change = self.resolver.resolve(found, &self.areas, &mut self.hover, self.now);
        match change {
            HoverChange::Entered(id) | HoverChange::Switched { to: id, .. } => {
                log::debug!("hovering {}", self.system.name(id));
            }
            HoverChange::Left(id) => log::debug!("left {}", self.system.name(id)),
            HoverChange::None | HoverChange::Continued(_) => {}
        }
        change
    }

    /// A click (not a drag) at a canvas point.
    pub fn click_at(&mut self, point: DVec2) {
        match self.list.hit_test(point, HOVER_TOLERANCE).map(|hit| hit.tag) {
            Some(HitTag::LayerIndicator(id)) => self.cycle_layer(id),
            Some(tag) => self.set_center(tag.body()),
            None => self.set_center(BodyId::STAR),
        }
    }

    /// Keyboard: Space toggles pause.
    pub fn process_keys(&mut self) {
        if self.input.is_pause_pressed() {
            self.toggle_pause();
        }
    }

    /// Rebuild the display list and hit-area index from current state.
    pub(crate) fn rebuild(&mut self) {
        let mut list = std::mem::take(&mut self.list);
        let mut areas = std::mem::take(&mut self.areas);
        Scene {
            system: &self.system,
            states: &self.states,
            sim: &self.sim,
            offset: self.center.offset(),
            hover: &self.hover,
            compositions: &self.compositions,
            formulas: &self.formulas,
            viewport: self.viewport,
        }
        .build(&mut list, &mut areas);
        self.list = list;
        self.areas = areas;
    }
}
