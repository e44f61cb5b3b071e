//! View transform: 3D scene space to 2D screen space.
//!
//! Scene space has the orbital plane on X/Z with Y perpendicular to it. The
//! view spins the scene around the vertical (Y) axis by `rotation` degrees and
//! then tilts it toward the viewer by `inclination` degrees. The result is an
//! offset from the viewport's visual center, in pixels.

use glam::{DVec2, DVec3};

/// Orientation of the orthographic view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Tilt about the horizontal screen axis, degrees (-90..=90).
    pub inclination: f64,
    /// Spin about the vertical axis, degrees (0..360).
    pub rotation: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            inclination: 60.0,
            rotation: 0.0,
        }
    }
}

impl ViewTransform {
    pub fn new(inclination: f64, rotation: f64) -> Self {
        Self {
            inclination,
            rotation,
        }
    }

    /// Project a scene point to a screen offset.
    ///
    /// `center_offset` is subtracted first so the given point becomes the
    /// visual origin; pass `None` for things pinned to the viewport center
    /// such as the axis indicator.
    pub fn project(&self, point: DVec3, center_offset: Option<DVec3>) -> DVec2 {
        project(point, self.inclination, self.rotation, center_offset)
    }
}

/// Free-function form of [`ViewTransform::project`].
pub fn project(
    point: DVec3,
    inclination: f64,
    rotation: f64,
    center_offset: Option<DVec3>,
) -> DVec2 {
    let p = match center_offset {
        Some(offset) => point - offset,
        None => point,
    };

    let (sin_r, cos_r) = rotation.to_radians().sin_cos();
    let x_rot = p.x * cos_r + p.z * sin_r;
    let z_rot = -p.x * sin_r + p.z * cos_r;

    let (sin_i, cos_i) = inclination.to_radians().sin_cos();
    DVec2::new(x_rot, p.y * cos_i - z_rot * sin_i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn identity_when_flat_and_unrotated() {
        let p = project(DVec3::new(12.5, -3.0, 40.0), 0.0, 0.0, None);
        assert!((p.x - 12.5).abs() < EPS);
        assert!((p.y + 3.0).abs() < EPS);
    }

    #[test]
    fn offset_is_subtracted_before_rotation() {
        let offset = DVec3::new(10.0, 0.0, 5.0);
        let p = project(DVec3::new(10.0, 0.0, 5.0), 35.0, 120.0, Some(offset));
        assert!(p.length() < EPS);
    }

    #[test]
    fn full_revolution_returns_to_start() {
        let point = DVec3::new(30.0, 4.0, -18.0);
        let start = project(point, 45.0, 0.0, None);
        let mut last = start;
        for step in 1..=72 {
            let r = step as f64 * 5.0;
            last = project(point, 45.0, r, None);
        }
        assert!((last - start).length() < 1e-9);
    }

    #[test]
    fn edge_on_view_flattens_orbital_plane() {
        // At 90° inclination a point on the +Z axis lands straight up the screen.
        let p = project(DVec3::new(0.0, 0.0, 50.0), 90.0, 0.0, None);
        assert!(p.x.abs() < EPS);
        assert!((p.y + 50.0).abs() < 1e-9);
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let v = ViewTransform::new(0.0, 90.0);
        let p = v.project(DVec3::new(0.0, 0.0, 20.0), None);
        assert!((p.x - 20.0).abs() < EPS);
    }
}
