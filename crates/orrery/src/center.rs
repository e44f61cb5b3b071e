//! Re-centering the view on another body.
//!
//! A transition runs 25 steps of 20 ms with ease-out progress. While it runs
//! the pan offset slides from the current center's position to the target's;
//! when it completes the target becomes the center. Starting another
//! transition replaces the running one.

use std::time::Duration;

use engine_core::{lerp_point, DVec3, Tween};

use crate::system::{BodyId, SolarSystem};

pub const TRANSITION_STEPS: u32 = 25;
pub const TRANSITION_STEP: Duration = Duration::from_millis(20);

#[derive(Debug, Clone)]
pub struct CenterTransition {
    current: BodyId,
    target: Option<BodyId>,
    tween: Option<Tween>,
    progress: f64,
    offset: Option<DVec3>,
}

impl Default for CenterTransition {
    fn default() -> Self {
        Self {
            current: BodyId::STAR,
            target: None,
            tween: None,
            progress: 0.0,
            offset: None,
        }
    }
}

impl CenterTransition {
    pub fn new() -> Self {
        Self::default()
    }

    /// The settled center.
    pub fn current(&self) -> BodyId {
        self.current
    }

    /// Body being moved to, while a transition runs.
    pub fn target(&self) -> Option<BodyId> {
        self.target
    }

    /// The target while transitioning, else the current center.
    pub fn effective(&self) -> BodyId {
        self.target.unwrap_or(self.current)
    }

    /// Eased progress of the running transition, 0 when idle.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Pan offset subtracted before projection; `None` keeps the star at the origin.
    pub fn offset(&self) -> Option<DVec3> {
        self.offset
    }

    /// Start moving toward `id`. Returns false, changing nothing, when `id`
    /// is already the center or already the target in flight.
    pub fn set_center(&mut self, id: BodyId, now: Duration) -> bool {
        if id == self.current || self.target == Some(id) {
            return false;
        }
        if let Some(previous) = self.target {
            log::debug!("center transition to {:?} superseded", previous);
        }
        self.target = Some(id);
        self.progress = 0.0;
        self.tween = Some(Tween::stepped(
            now,
            TRANSITION_STEPS,
            TRANSITION_STEP,
            0.0,
            1.0,
        ));
        true
    }

    /// Advance the running transition. Returns the body that just became the center.
    pub fn tick(&mut self, now: Duration) -> Option<BodyId> {
        let tween = self.tween?;
        self.progress = tween.value(now);
        if !tween.is_finished(now) {
            return None;
        }
        let settled = self.target.take()?;
        self.current = settled;
        self.tween = None;
        self.progress = 0.0;
        Some(settled)
    }

    /// Recompute the pan offset for this frame.
    pub fn update_offset(&mut self, system: &SolarSystem, time: f64, scale: f64) {
        if self.current.is_star() && self.target.is_none() {
            self.offset = None;
            return;
        }
        let from = system.position(self.current, time, scale);
        self.offset = Some(match self.target {
            Some(target) => lerp_point(from, system.position(target, time, scale), self.progress),
            None => from,
        });
    }
}
