//! Hover radius and composition-sweep animations, one record per body.
//!
//! A body's record is created on its first expansion and removed when a
//! contraction back to the original radius completes. Each record carries
//! its own [`Tween`]s; the frame driver samples them all once per tick.
//!
//! ```text
//! idle -> expanding -> expanded (composition shown) -> contracting -> idle
//! ```

use std::collections::HashMap;
use std::time::Duration;

use catalogue::{CompositionTable, Layer};
use engine_core::Tween;

use crate::system::BodyId;

pub const RADIUS_DURATION: Duration = Duration::from_millis(500);
pub const SWEEP_DURATION: Duration = Duration::from_millis(1000);
/// Hover radius relative to the resting hit-area radius.
pub const EXPANDED_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct RadiusAnimation {
    tween: Tween,
    expanding: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverState {
    /// 0 at rest size, 1 fully expanded.
    pub progress: f64,
    pub radius: f64,
    pub original_radius: f64,
    pub current_layer: Layer,
    /// Set once an expansion completes; the composition ring may draw.
    pub show_composition: bool,
    sweep: Option<Tween>,
    sweep_progress: Option<f64>,
    animation: Option<RadiusAnimation>,
    /// Contraction requested while still expanding.
    contract_after: bool,
}

impl HoverState {
    fn new(radius: f64, original_radius: f64) -> Self {
        Self {
            progress: 0.0,
            radius,
            original_radius,
            current_layer: Layer::default(),
            show_composition: false,
            sweep: None,
            sweep_progress: None,
            animation: None,
            contract_after: false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_expanding(&self) -> bool {
        self.animation.is_some_and(|a| a.expanding)
    }

    pub fn is_contracting(&self) -> bool {
        self.animation.is_some_and(|a| !a.expanding)
    }

    pub fn composition_started(&self) -> bool {
        self.sweep.is_some()
    }

    /// Eased sweep progress, `None` until the sweep starts.
    pub fn composition_progress(&self) -> Option<f64> {
        self.sweep_progress
    }

    fn reset_sweep(&mut self) {
        self.sweep = None;
        self.sweep_progress = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct HoverAnimations {
    states: HashMap<BodyId, HoverState>,
}

impl HoverAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: BodyId) -> Option<&HoverState> {
        self.states.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.states.contains_key(&id)
    }

    /// Animated radius for a body's hit area, if it has a record.
    pub fn radius(&self, id: BodyId) -> Option<f64> {
        self.states.get(&id).map(|s| s.radius)
    }

    /// Start animating `id` toward `target` from wherever its radius is now.
    ///
    /// Any running animation for the body is replaced. Layer selection and
    /// sweep state are left alone.
    pub fn animate_radius(
        &mut self,
        id: BodyId,
        target: f64,
        original_radius: f64,
        now: Duration,
        duration: Duration,
    ) {
        let state = self
            .states
            .entry(id)
            .or_insert_with(|| HoverState::new(original_radius, original_radius));
        state.original_radius = original_radius;
        state.animation = Some(RadiusAnimation {
            tween: Tween::new(now, duration, state.radius, target),
            expanding: target > original_radius,
        });
    }

    /// Grow the hit area to twice its resting size.
    pub fn expand(&mut self, id: BodyId, original_radius: f64, now: Duration) {
        log::debug!("hover expand {:?}", id);
        self.animate_radius(
            id,
            original_radius * EXPANDED_FACTOR,
            original_radius,
            now,
            RADIUS_DURATION,
        );
        if let Some(state) = self.states.get_mut(&id) {
            state.contract_after = false;
        }
    }

    /// Shrink back to resting size. A running expansion finishes first.
    pub fn contract(&mut self, id: BodyId, now: Duration) {
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        if state.is_expanding() {
            state.contract_after = true;
            return;
        }
        if state.is_contracting() {
            return;
        }
        let original = state.original_radius;
        self.animate_radius(id, original, original, now, RADIUS_DURATION);
    }

    /// Hide the composition ring, e.g. when the pointer leaves the body.
    pub fn hide_composition(&mut self, id: BodyId) {
        if let Some(state) = self.states.get_mut(&id) {
            state.show_composition = false;
            state.reset_sweep();
        }
    }

    /// Start the composition sweep unless it has already started.
    pub fn ensure_sweep(&mut self, id: BodyId, now: Duration) {
        if let Some(state) = self.states.get_mut(&id) {
            if state.sweep.is_none() {
                state.sweep = Some(Tween::new(now, SWEEP_DURATION, 0.0, 1.0));
                state.sweep_progress = Some(0.0);
            }
        }
    }

    /// Show the next material layer and restart the sweep.
    pub fn cycle_layer(
        &mut self,
        id: BodyId,
        name: &str,
        table: &CompositionTable,
        now: Duration,
    ) -> Option<Layer> {
        let state = self.states.get_mut(&id)?;
        let body = table.get(name)?;
        state.current_layer = body.next_layer(state.current_layer);
        state.sweep = Some(Tween::new(now, SWEEP_DURATION, 0.0, 1.0));
        state.sweep_progress = Some(0.0);
        state.show_composition = true;
        log::debug!("{} layer -> {}", name, state.current_layer);
        Some(state.current_layer)
    }

    /// Sample every animation at `now`.
    ///
    /// Returns true when a contraction finished and its record was dropped;
    /// the caller should redraw so suppressed labels come back.
    pub fn tick(&mut self, now: Duration) -> bool {
        let mut finished = Vec::new();
        let mut deferred = Vec::new();

        for (id, state) in self.states.iter_mut() {
            if let Some(sweep) = state.sweep {
                state.sweep_progress = Some(sweep.eased(now));
            }
            let Some(anim) = state.animation else {
                continue;
            };
            let eased = anim.tween.eased(now);
            state.radius = anim.tween.value(now);
            state.progress = if anim.expanding { eased } else { 1.0 - eased };
            if !anim.tween.is_finished(now) {
                continue;
            }
            state.animation = None;
            if anim.expanding {
                if state.contract_after {
                    state.contract_after = false;
                    deferred.push(*id);
                } else {
                    state.show_composition = true;
                }
            } else {
                finished.push(*id);
            }
        }

        for id in deferred {
            self.contract(id, now);
        }
        for id in &finished {
            self.states.remove(id);
        }
        !finished.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn body(i: usize) -> BodyId {
        BodyId::from_index(i)
    }

    #[test]
    fn expansion_reveals_composition() {
        let mut anims = HoverAnimations::new();
        anims.expand(body(3), 20.0, ms(0));
        anims.tick(ms(250));
        let s = anims.get(body(3)).unwrap();
        assert!(s.radius > 20.0 && s.radius < 40.0);
        assert!(!s.show_composition);

        anims.tick(ms(500));
        let s = anims.get(body(3)).unwrap();
        assert_eq!(s.radius, 40.0);
        assert_eq!(s.progress, 1.0);
        assert!(s.show_composition);
        assert!(!s.is_animating());
    }

    #[test]
    fn radius_is_monotonic_per_phase() {
        let mut anims = HoverAnimations::new();
        anims.expand(body(1), 20.0, ms(0));
        let mut last = 20.0;
        for t in (0..=500).step_by(16) {
            anims.tick(ms(t));
            let r = anims.radius(body(1)).unwrap();
            assert!(r >= last);
            last = r;
        }
        anims.tick(ms(500));
        anims.contract(body(1), ms(600));
        let mut last = 40.0;
        for t in (600..1100).step_by(16) {
            anims.tick(ms(t));
            let r = anims.radius(body(1)).unwrap();
            assert!(r <= last);
            last = r;
        }
    }

    #[test]
    fn contraction_removes_record() {
        let mut anims = HoverAnimations::new();
        anims.expand(body(2), 20.0, ms(0));
        anims.tick(ms(500));
        anims.contract(body(2), ms(500));
        assert!(!anims.tick(ms(900)));
        assert!(anims.contains(body(2)));
        assert!(anims.tick(ms(1000)));
        assert!(anims.is_empty());
    }

    #[test]
    fn contraction_waits_for_running_expansion() {
        let mut anims = HoverAnimations::new();
        anims.expand(body(4), 20.0, ms(0));
        anims.tick(ms(100));
        anims.contract(body(4), ms(100));
        assert!(anims.get(body(4)).unwrap().is_expanding());

        anims.tick(ms(500));
        let s = anims.get(body(4)).unwrap();
        assert_eq!(s.radius, 40.0);
        assert!(s.is_contracting());

        assert!(anims.tick(ms(1000)));
        assert!(!anims.contains(body(4)));
    }

    #[test]
    fn re_expansion_cancels_deferred_contraction() {
        let mut anims = HoverAnimations::new();
        anims.expand(body(4), 20.0, ms(0));
        anims.contract(body(4), ms(100));
        anims.expand(body(4), 20.0, ms(200));
        anims.tick(ms(700));
        let s = anims.get(body(4)).unwrap();
        assert!(!s.is_animating());
        assert_eq!(s.radius, 40.0);
    }

    #[test]
    fn restart_keeps_layer_and_sweep() {
        let table = CompositionTable::builtin().unwrap();
        let mut anims = HoverAnimations::new();
        anims.expand(body(5), 20.0, ms(0));
        anims.tick(ms(500));
        anims.ensure_sweep(body(5), ms(500));
        anims.cycle_layer(body(5), "Earth", &table, ms(600));
        anims.animate_radius(body(5), 30.0, 20.0, ms(700), RADIUS_DURATION);
        let s = anims.get(body(5)).unwrap();
        assert_eq!(s.current_layer, Layer::Mantle);
        assert!(s.composition_started());
    }

    #[test]
    fn sweep_starts_once_and_only_cycling_resets_it() {
        let table = CompositionTable::builtin().unwrap();
        let mut anims = HoverAnimations::new();
        anims.expand(body(5), 20.0, ms(0));
        anims.tick(ms(500));
        anims.ensure_sweep(body(5), ms(500));
        anims.tick(ms(1000));
        let mid = anims.get(body(5)).unwrap().composition_progress().unwrap();
        assert!(mid > 0.0);

        anims.ensure_sweep(body(5), ms(1000));
        anims.tick(ms(1200));
        let later = anims.get(body(5)).unwrap().composition_progress().unwrap();
        assert!(later >= mid);

        anims.cycle_layer(body(5), "Earth", &table, ms(1200));
        assert_eq!(anims.get(body(5)).unwrap().composition_progress(), Some(0.0));
        anims.tick(ms(2200));
        assert_eq!(anims.get(body(5)).unwrap().composition_progress(), Some(1.0));
    }

    #[test]
    fn cycling_without_record_or_data_does_nothing() {
        let table = CompositionTable::builtin().unwrap();
        let mut anims = HoverAnimations::new();
        assert_eq!(anims.cycle_layer(body(1), "Earth", &table, ms(0)), None);
        anims.expand(body(1), 20.0, ms(0));
        assert_eq!(anims.cycle_layer(body(1), "Vulcan", &table, ms(0)), None);
        assert_eq!(anims.get(body(1)).unwrap().current_layer, Layer::Surface);
    }
}
