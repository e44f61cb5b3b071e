//! Drag and pinch gestures that steer the view.

use glam::DVec2;

/// Pointer travel (px, either axis) after which a press counts as a drag.
pub const DRAG_THRESHOLD: f64 = 5.0;
/// Degrees of view change per pixel dragged.
pub const DRAG_SENSITIVITY: f64 = 0.2;
/// Angles within this many degrees of a snap point stick to it.
pub const SNAP_THRESHOLD: f64 = 2.0;
/// Rotations within this many degrees below 360 wrap to exactly 0.
pub const ROTATION_WRAP_SNAP: f64 = 5.0;

pub const INCLINATION_SNAP_POINTS: [f64; 7] = [-60.0, -45.0, -30.0, 0.0, 30.0, 45.0, 60.0];
pub const ROTATION_SNAP_POINTS: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// Return the first snap point within `threshold` of `angle`, or `angle` itself.
pub fn snap_angle(angle: f64, snap_points: &[f64], threshold: f64) -> f64 {
    snap_points
        .iter()
        .copied()
        .find(|p| (angle - p).abs() <= threshold)
        .unwrap_or(angle)
}

/// Inclination/rotation pair produced by a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    pub inclination: f64,
    pub rotation: f64,
}

/// A press-and-drag in progress.
#[derive(Debug, Clone, Copy)]
pub struct DragGesture {
    origin: DVec2,
    start: ViewAngles,
    moved: bool,
}

impl DragGesture {
    pub fn new(origin: DVec2, start: ViewAngles) -> Self {
        Self {
            origin,
            start,
            moved: false,
        }
    }

    /// Whether the pointer has travelled past [`DRAG_THRESHOLD`] at any point.
    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Feed the current pointer position and get the resulting view angles.
    ///
    /// Vertical travel tilts (drag down increases inclination), horizontal
    /// travel spins with the sign inverted so dragging right turns clockwise.
    pub fn update(&mut self, current: DVec2) -> ViewAngles {
        let delta = current - self.origin;
        if delta.x.abs() > DRAG_THRESHOLD || delta.y.abs() > DRAG_THRESHOLD {
            self.moved = true;
        }

        let inclination = (self.start.inclination + delta.y * DRAG_SENSITIVITY).clamp(-90.0, 90.0);
        let inclination = snap_angle(inclination, &INCLINATION_SNAP_POINTS, SNAP_THRESHOLD);

        let raw_rotation = (self.start.rotation - delta.x * DRAG_SENSITIVITY).rem_euclid(360.0);
        let mut rotation = snap_angle(raw_rotation, &ROTATION_SNAP_POINTS, SNAP_THRESHOLD);
        if (raw_rotation - 360.0).abs() <= ROTATION_WRAP_SNAP {
            rotation = 0.0;
        }

        ViewAngles {
            inclination,
            rotation,
        }
    }
}

/// Two-finger pinch tracking.
#[derive(Debug, Clone, Copy)]
pub struct PinchGesture {
    last_distance: f64,
}

impl PinchGesture {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            last_distance: a.distance(b),
        }
    }

    /// Change in finger spacing since the previous update, in pixels.
    pub fn update(&mut self, a: DVec2, b: DVec2) -> f64 {
        let distance = a.distance(b);
        let delta = distance - self.last_distance;
        self.last_distance = distance;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(inclination: f64, rotation: f64) -> ViewAngles {
        ViewAngles {
            inclination,
            rotation,
        }
    }

    #[test]
    fn small_motion_is_not_a_drag() {
        let mut g = DragGesture::new(DVec2::new(100.0, 100.0), start(10.0, 10.0));
        g.update(DVec2::new(104.0, 97.0));
        assert!(!g.moved());
        g.update(DVec2::new(106.0, 100.0));
        assert!(g.moved());
        // Coming back does not undo the drag.
        g.update(DVec2::new(100.0, 100.0));
        assert!(g.moved());
    }

    #[test]
    fn vertical_drag_tilts_and_clamps() {
        let mut g = DragGesture::new(DVec2::ZERO, start(10.0, 10.0));
        let a = g.update(DVec2::new(0.0, 50.0));
        assert!((a.inclination - 20.0).abs() < 1e-9);
        let a = g.update(DVec2::new(0.0, 2_000.0));
        assert_eq!(a.inclination, 90.0);
        let a = g.update(DVec2::new(0.0, -2_000.0));
        assert_eq!(a.inclination, -90.0);
    }

    #[test]
    fn inclination_snaps_within_threshold() {
        let mut g = DragGesture::new(DVec2::ZERO, start(20.0, 10.0));
        // 20 + 44 * 0.2 = 28.8 -> snaps to 30
        let a = g.update(DVec2::new(0.0, 44.0));
        assert_eq!(a.inclination, 30.0);
    }

    #[test]
    fn horizontal_drag_rotates_inverted_and_wraps() {
        let mut g = DragGesture::new(DVec2::ZERO, start(10.0, 10.0));
        // Drag right 100px: 10 - 20 = -10 -> 350
        let a = g.update(DVec2::new(100.0, 0.0));
        assert!((a.rotation - 350.0).abs() < 1e-9);
        // Drag left 100px: 10 + 20 = 30
        let a = g.update(DVec2::new(-100.0, 0.0));
        assert!((a.rotation - 30.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_near_full_turn_wraps_to_zero() {
        let mut g = DragGesture::new(DVec2::ZERO, start(10.0, 10.0));
        // 10 - 70 * 0.2 = -4 -> 356, within the wrap window
        let a = g.update(DVec2::new(70.0, 0.0));
        assert_eq!(a.rotation, 0.0);
    }

    #[test]
    fn snap_angle_leaves_far_values_alone() {
        assert_eq!(snap_angle(52.0, &INCLINATION_SNAP_POINTS, SNAP_THRESHOLD), 52.0);
        assert_eq!(snap_angle(-44.0, &INCLINATION_SNAP_POINTS, SNAP_THRESHOLD), -45.0);
        assert_eq!(snap_angle(136.5, &ROTATION_SNAP_POINTS, SNAP_THRESHOLD), 135.0);
    }

    #[test]
    fn pinch_reports_spacing_change() {
        let mut p = PinchGesture::new(DVec2::ZERO, DVec2::new(100.0, 0.0));
        assert!((p.update(DVec2::ZERO, DVec2::new(130.0, 0.0)) - 30.0).abs() < 1e-9);
        assert!((p.update(DVec2::ZERO, DVec2::new(120.0, 0.0)) + 10.0).abs() < 1e-9);
    }
}
