//! Pointer, wheel and keyboard handling for the orrery views.
//!
//! Mouse and touch events are folded into one [`PointerSample`] so the views
//! only deal with "the primary pointer". [`InputState`] turns press/move/
//! release sequences into clicks, view-steering drags and pinches.

pub mod gesture;
pub mod wheel;

pub use gesture::*;
pub use wheel::*;

use glam::DVec2;
use std::collections::HashSet;

/// Key that toggles pause.
pub const PAUSE_KEY: KeyCode = KeyCode::Space;

/// One pointer event, in client coordinates, from either a mouse or a touch screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    Mouse(DVec2),
    Touch {
        /// Points still on the surface.
        touches: Vec<DVec2>,
        /// Points that changed in this event (the lifted finger on release).
        changed: Vec<DVec2>,
    },
}

impl PointerSample {
    /// The primary point: first active touch, else first changed touch, else the mouse.
    pub fn primary(&self) -> Option<DVec2> {
        match self {
            PointerSample::Mouse(p) => Some(*p),
            PointerSample::Touch { touches, changed } => {
                touches.first().or_else(|| changed.first()).copied()
            }
        }
    }

    /// The two active touch points when exactly two fingers are down.
    pub fn pinch_pair(&self) -> Option<(DVec2, DVec2)> {
        match self {
            PointerSample::Touch { touches, .. } if touches.len() == 2 => {
                Some((touches[0], touches[1]))
            }
            _ => None,
        }
    }
}

/// What a pointer release turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRelease {
    /// Press and release without dragging: a click/tap at this canvas point.
    Click(DVec2),
    /// The end of a drag or pinch.
    GestureEnd,
    /// Release with no press in progress.
    Ignored,
}

/// What a pointer move produced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerMotion {
    /// Pointer position on the canvas, if the sample had one.
    pub position: Option<DVec2>,
    /// New view angles while a drag is in progress.
    pub drag: Option<ViewAngles>,
    /// Finger spacing change while pinching.
    pub pinch_delta: Option<f64>,
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Client position of the canvas' top-left corner.
    canvas_origin: DVec2,
    /// Last known pointer position in canvas coordinates.
    pointer_position: Option<DVec2>,

    drag: Option<DragGesture>,
    pinch: Option<PinchGesture>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the canvas sits in client coordinates.
    pub fn set_canvas_origin(&mut self, origin: DVec2) {
        self.canvas_origin = origin;
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Convert a sample's primary point to canvas coordinates.
    pub fn to_canvas(&self, sample: &PointerSample) -> Option<DVec2> {
        sample.primary().map(|p| p - self.canvas_origin)
    }

    /// Press: starts a pinch when two fingers are down, a drag otherwise.
    pub fn pointer_down(&mut self, sample: &PointerSample, view: ViewAngles) {
        if let Some((a, b)) = sample.pinch_pair() {
            self.pinch = Some(PinchGesture::new(a, b));
            self.drag = None;
            return;
        }
        self.pinch = None;
        if let Some(p) = self.to_canvas(sample) {
            self.pointer_position = Some(p);
            self.drag = Some(DragGesture::new(p, view));
        }
    }

    /// Move: track the pointer and advance whichever gesture is active.
    pub fn pointer_move(&mut self, sample: &PointerSample) -> PointerMotion {
        let mut motion = PointerMotion::default();

        if let (Some(pinch), Some((a, b))) = (self.pinch.as_mut(), sample.pinch_pair()) {
            motion.pinch_delta = Some(pinch.update(a, b));
            return motion;
        }

        let position = self.to_canvas(sample);
        if position.is_some() {
            self.pointer_position = position;
        }
        motion.position = position;
        if let (Some(drag), Some(p)) = (self.drag.as_mut(), position) {
            motion.drag = Some(drag.update(p));
        }
        motion
    }

    /// Release: a press that never travelled past the drag threshold is a click.
    pub fn pointer_up(&mut self, sample: &PointerSample) -> PointerRelease {
        let pinch = self.pinch.take();
        let Some(drag) = self.drag.take() else {
            return if pinch.is_some() {
                PointerRelease::GestureEnd
            } else {
                PointerRelease::Ignored
            };
        };
        if drag.moved() {
            return PointerRelease::GestureEnd;
        }
        let at = self.to_canvas(sample).unwrap_or(drag.origin());
        log::trace!("pointer click at ({:.1}, {:.1})", at.x, at.y);
        PointerRelease::Click(at)
    }

    /// Pointer left the canvas or the touch was cancelled.
    pub fn pointer_cancel(&mut self) {
        self.drag = None;
        self.pinch = None;
    }

    // Query methods

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Last known pointer position in canvas coordinates.
    pub fn pointer_position(&self) -> Option<DVec2> {
        self.pointer_position
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if pause was pressed this frame (Space).
    pub fn is_pause_pressed(&self) -> bool {
        self.is_key_pressed(PAUSE_KEY)
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewAngles {
        ViewAngles {
            inclination: 10.0,
            rotation: 10.0,
        }
    }

    #[test]
    fn touch_primary_prefers_active_then_changed() {
        let s = PointerSample::Touch {
            touches: vec![DVec2::new(1.0, 2.0)],
            changed: vec![DVec2::new(9.0, 9.0)],
        };
        assert_eq!(s.primary(), Some(DVec2::new(1.0, 2.0)));
        let s = PointerSample::Touch {
            touches: vec![],
            changed: vec![DVec2::new(9.0, 9.0)],
        };
        assert_eq!(s.primary(), Some(DVec2::new(9.0, 9.0)));
        let s = PointerSample::Touch {
            touches: vec![],
            changed: vec![],
        };
        assert_eq!(s.primary(), None);
    }

    #[test]
    fn press_release_in_place_is_a_click() {
        let mut input = InputState::new();
        input.set_canvas_origin(DVec2::new(10.0, 20.0));
        let down = PointerSample::Mouse(DVec2::new(110.0, 120.0));
        input.pointer_down(&down, view());
        input.pointer_move(&PointerSample::Mouse(DVec2::new(113.0, 121.0)));
        let up = PointerSample::Mouse(DVec2::new(113.0, 121.0));
        assert_eq!(input.pointer_up(&up), PointerRelease::Click(DVec2::new(103.0, 101.0)));
        assert!(!input.is_dragging());
    }

    #[test]
    fn press_move_release_is_a_drag() {
        let mut input = InputState::new();
        input.pointer_down(&PointerSample::Mouse(DVec2::ZERO), view());
        let motion = input.pointer_move(&PointerSample::Mouse(DVec2::new(0.0, 50.0)));
        let angles = motion.drag.unwrap();
        assert!((angles.inclination - 20.0).abs() < 1e-9);
        assert_eq!(
            input.pointer_up(&PointerSample::Mouse(DVec2::new(0.0, 50.0))),
            PointerRelease::GestureEnd
        );
    }

    #[test]
    fn two_fingers_pinch_instead_of_drag() {
        let mut input = InputState::new();
        let down = PointerSample::Touch {
            touches: vec![DVec2::ZERO, DVec2::new(100.0, 0.0)],
            changed: vec![],
        };
        input.pointer_down(&down, view());
        assert!(input.is_pinching());
        assert!(!input.is_dragging());
        let motion = input.pointer_move(&PointerSample::Touch {
            touches: vec![DVec2::ZERO, DVec2::new(140.0, 0.0)],
            changed: vec![],
        });
        assert!((motion.pinch_delta.unwrap() - 40.0).abs() < 1e-9);
        let up = PointerSample::Touch {
            touches: vec![],
            changed: vec![DVec2::new(140.0, 0.0)],
        };
        assert_eq!(input.pointer_up(&up), PointerRelease::GestureEnd);
    }

    #[test]
    fn hover_moves_without_press_do_not_drag() {
        let mut input = InputState::new();
        let motion = input.pointer_move(&PointerSample::Mouse(DVec2::new(5.0, 5.0)));
        assert_eq!(motion.position, Some(DVec2::new(5.0, 5.0)));
        assert_eq!(input.pointer_position(), Some(DVec2::new(5.0, 5.0)));
        assert!(motion.drag.is_none());
        assert_eq!(
            input.pointer_up(&PointerSample::Mouse(DVec2::new(5.0, 5.0))),
            PointerRelease::Ignored
        );
    }

    #[test]
    fn pause_key_is_one_shot_per_frame() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(input.is_pause_pressed());
        input.begin_frame();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(!input.is_pause_pressed());
        assert!(input.is_key_held(KeyCode::Space));
    }

    #[test]
    fn released_key_can_be_pressed_again() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        input.begin_frame();
        input.process_keyboard(KeyCode::Space, ElementState::Released);
        assert!(!input.is_key_held(KeyCode::Space));
        assert!(!input.is_pause_pressed());
        input.begin_frame();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(input.is_pause_pressed());
    }
}
