//! The per-frame driver.

use std::time::Duration;

use renderer::Canvas;

use crate::state::Orrery;
use crate::system::BodyId;

/// What one call to [`Orrery::frame`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Simulated time moved forward.
    pub advanced: bool,
    /// The scene was rebuilt and painted.
    pub redrawn: bool,
}

impl Orrery {
    /// Run one display refresh at frame time `now`.
    ///
    /// Body states are retargeted and faded first, then the pan offset is
    /// updated. Time only advances while unpaused and nothing is hovered, so
    /// a hovered body holds still while its composition is read. Otherwise
    /// the scene is redrawn only when something is animating.
    pub fn frame<C: Canvas + ?Sized>(&mut self, now: Duration, canvas: &mut C) -> FrameOutcome {
        self.now = now;
        self.process_keys();
        self.input.begin_frame();

        if let Some(settled) = self.center.tick(now) {
            log::info!("centered on {}", self.system.name(settled));
        }
        let transitioning = self.center.is_transitioning();
        let any_changing = self
            .states
            .update(self.center.effective(), !transitioning);
        self.center
            .update_offset(&self.system, self.sim.time, self.sim.scale);

        let contraction_done = self.hover.tick(now);
        self.start_composition_sweeps(now);
        let hovering = self.resolver.is_hovering();

        let mut outcome = FrameOutcome::default();
        if !self.sim.paused && !hovering {
            self.sim.advance();
            outcome.advanced = true;
            outcome.redrawn = true;
        } else {
            outcome.redrawn = any_changing
                || !self.hover.is_empty()
                || hovering
                || transitioning
                || contraction_done
                || self.dirty;
        }

        if outcome.redrawn {
            self.rebuild();
            self.list.replay(canvas);
            self.dirty = false;
        }
        outcome
    }

    /// Kick off the ring sweep for bodies whose composition just became visible.
    fn start_composition_sweeps(&mut self, now: Duration) {
        let ready: Vec<BodyId> = self
            .system
            .iter()
            .filter(|body| {
                self.hover.get(body.id).is_some_and(|h| {
                    h.show_composition
                        && !h.composition_started()
                        && self.compositions.layer(&body.name, h.current_layer).is_some()
                })
            })
            .map(|body| body.id)
            .collect();
        for id in ready {
            self.hover.ensure_sweep(id, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrreryConfig;
    use crate::hover::HoverChange;
    use crate::scene::layer;
    use engine_core::DVec2;
    use input::{ElementState, KeyCode};
    use renderer::{CountingCanvas, Shape};

    const FRAME: Duration = Duration::from_micros(16_667);

    fn orrery() -> Orrery {
        Orrery::with_builtin_data(&OrreryConfig::default()).unwrap()
    }

    fn run(o: &mut Orrery, canvas: &mut CountingCanvas, start: u32, frames: u32) -> FrameOutcome {
        let mut last = FrameOutcome::default();
        for i in start..start + frames {
            last = o.frame(FRAME * i, canvas);
        }
        last
    }

    #[test]
    fn time_advances_while_running() {
        let mut o = orrery();
        let mut canvas = CountingCanvas::new();
        let out = o.frame(Duration::ZERO, &mut canvas);
        assert!(out.advanced && out.redrawn);
        assert_eq!(o.sim().time, 0.5);
        assert_eq!(canvas.frames, 1);
    }

    #[test]
    fn paused_and_idle_skips_redraw() {
        let mut o = orrery();
        let mut canvas = CountingCanvas::new();
        o.toggle_pause();
        // The first frame still paints the pending state.
        assert!(o.frame(Duration::ZERO, &mut canvas).redrawn);
        let out = o.frame(FRAME, &mut canvas);
        assert_eq!(out, FrameOutcome::default());
        assert_eq!(o.sim().time, 0.0);
        assert_eq!(canvas.frames, 1);
    }

    #[test]
    fn space_toggles_pause() {
        let mut o = orrery();
        let mut canvas = CountingCanvas::new();
        o.input_mut()
            .process_keyboard(KeyCode::Space, ElementState::Pressed);
        o.frame(Duration::ZERO, &mut canvas);
        assert!(o.sim().paused);
    }

    #[test]
    fn hovering_freezes_time_but_keeps_animating() {
        let mut o = orrery();
        let mut canvas = CountingCanvas::new();
        o.frame(Duration::ZERO, &mut canvas);
        let earth = o.system().id_of("Earth").unwrap();
        let at = o.hit_areas().get(earth).unwrap().center;
        assert_eq!(o.hover_at(at), HoverChange::Entered(earth));

        let time = o.sim().time;
        let out = run(&mut o, &mut canvas, 1, 90);
        assert!(!out.advanced && out.redrawn);
        assert_eq!(o.sim().time, time);

        let state = o.hover_animations().get(earth).unwrap();
        assert!(state.show_composition);
        assert!(state.composition_started());
        assert_eq!(state.radius, 40.0);
    }

    #[test]
    fn recentering_settles_and_fades() {
        let mut o = orrery();
        let mut canvas = CountingCanvas::new();
        o.toggle_pause();
        o.frame(Duration::ZERO, &mut canvas);
        let jupiter = o.system().id_of("Jupiter").unwrap();
        o.set_center(jupiter);
        run(&mut o, &mut canvas, 1, 40);
        assert_eq!(o.center().current(), jupiter);
        assert!(o.body_states().get(jupiter).unwrap().is_center);

        // Fades run about 20 frames past settling; then paused frames go idle.
        run(&mut o, &mut canvas, 41, 40);
        let out = run(&mut o, &mut canvas, 81, 5);
        assert!(!out.redrawn);
        let io = o.system().id_of("Io").unwrap();
        assert_eq!(o.body_states().get(io).unwrap().opacity, 1.0);
        assert!(o.hit_areas().get(io).is_some());
    }

    #[test]
    fn axes_stay_at_viewport_center_while_recentered() {
        let mut o = orrery();
        let mut canvas = CountingCanvas::new();
        o.frame(Duration::ZERO, &mut canvas);
        let jupiter = o.system().id_of("Jupiter").unwrap();
        o.set_center(jupiter);
        run(&mut o, &mut canvas, 1, 40);
        assert_eq!(o.center().current(), jupiter);
        assert!(o.center().offset().is_some());

        let middle = o.viewport() * 0.5;
        assert_eq!(middle, DVec2::new(640.0, 360.0));
        let starts: Vec<DVec2> = o
            .display_list()
            .iter()
            .filter(|(l, _)| *l == layer::AXIS)
            .filter_map(|(_, item)| match &item.shape {
                Shape::Polyline { points, .. } => points.first().copied(),
                _ => None,
            })
            .collect();
        assert_eq!(starts, vec![middle; 3]);
    }

    #[test]
    fn paused_redraw_restores_labels_after_contraction() {
        let mut o = orrery();
        let mut canvas = CountingCanvas::new();
        o.toggle_pause();
        o.frame(Duration::ZERO, &mut canvas);
        let venus = "Venus".to_string();
        assert!(canvas.last_frame_text.contains(&venus));

        let earth = o.system().id_of("Earth").unwrap();
        let at = o.hit_areas().get(earth).unwrap().center;
        assert_eq!(o.hover_at(at), HoverChange::Entered(earth));
        run(&mut o, &mut canvas, 1, 60);
        assert!(!canvas.last_frame_text.contains(&venus));

        assert_eq!(o.hover_at(DVec2::new(4.0, 4.0)), HoverChange::Left(earth));
        let mut settled_at = None;
        for i in 61..100 {
            let out = o.frame(FRAME * i, &mut canvas);
            if o.hover_animations().is_empty() {
                // The frame that drops the contracted entry must still paint.
                assert!(out.redrawn);
                settled_at = Some(i);
                break;
            }
        }
        let settled_at = settled_at.expect("contraction never finished");
        assert!(canvas.last_frame_text.contains(&venus));
        assert_eq!(o.sim().time, 0.0);
        assert!(!o.frame(FRAME * (settled_at + 1), &mut canvas).redrawn);
    }

    #[test]
    fn scenario_hover_handover() {
        let mut o = orrery();
        let mut canvas = CountingCanvas::new();
        o.frame(Duration::ZERO, &mut canvas);
        let earth = o.system().id_of("Earth").unwrap();
        let mars = o.system().id_of("Mars").unwrap();

        let at = o.hit_areas().get(earth).unwrap().center;
        o.hover_at(at);
        run(&mut o, &mut canvas, 1, 40);
        let at = o.hit_areas().get(mars).unwrap().center;
        assert_eq!(
            o.hover_at(at),
            HoverChange::Switched {
                from: earth,
                to: mars
            }
        );
        run(&mut o, &mut canvas, 41, 40);
        assert!(o.hover_animations().get(earth).is_none());
        assert!(o.hover_animations().get(mars).unwrap().show_composition);
    }
}
