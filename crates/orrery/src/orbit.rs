//! Circular inclined orbits.

use std::f64::consts::TAU;

use catalogue::CelestialBody;
use engine_core::DVec3;

/// Orbital parameters of one body around its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Angle at time zero, radians.
    pub angle: f64,
    /// Days per revolution; always positive.
    pub period: f64,
    /// Radius in scene units before scaling.
    pub distance: f64,
    /// Tilt of the orbital plane, degrees.
    pub inclination: f64,
}

impl From<&CelestialBody> for Orbit {
    fn from(body: &CelestialBody) -> Self {
        Self {
            angle: body.angle,
            period: body.period,
            distance: body.distance,
            inclination: body.orbital_inclination,
        }
    }
}

impl Orbit {
    /// Orbital angle after `time` simulated days.
    pub fn angle_at(&self, time: f64) -> f64 {
        self.angle + (time / self.period) * TAU
    }
}

/// Position on an orbit at `angle`, relative to the orbit's center.
fn point_on_orbit(orbit: &Orbit, angle: f64, scale: f64) -> DVec3 {
    let radius = orbit.distance * scale;
    let x = angle.cos() * radius;
    let z = angle.sin() * radius;
    let (sin_i, cos_i) = orbit.inclination.to_radians().sin_cos();
    DVec3::new(x, z * sin_i, z * cos_i)
}

/// Position relative to the parent after `time` simulated days.
pub fn orbital_position(orbit: &Orbit, time: f64, scale: f64) -> DVec3 {
    point_on_orbit(orbit, orbit.angle_at(time), scale)
}

/// Closed ring of `segments` points tracing the whole orbit around `center`.
pub fn orbit_ring(orbit: &Orbit, scale: f64, segments: usize, center: DVec3) -> Vec<DVec3> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = i as f64 / segments as f64 * TAU;
            center + point_on_orbit(orbit, angle, scale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit(angle: f64, period: f64, distance: f64, inclination: f64) -> Orbit {
        Orbit {
            angle,
            period,
            distance,
            inclination,
        }
    }

    #[test]
    fn starts_on_the_x_axis() {
        let p = orbital_position(&orbit(0.0, 365.0, 100.0, 0.0), 0.0, 1.0);
        assert!((p - DVec3::new(100.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn angle_advances_with_time() {
        let o = orbit(0.3, 88.0, 38.7, 0.0);
        for t in [0.0, 10.0, 44.0, 88.0, 1000.5] {
            let p = orbital_position(&o, t, 1.0);
            let measured = p.z.atan2(p.x).rem_euclid(TAU);
            let expected = (0.3 + TAU * t / 88.0).rem_euclid(TAU);
            let diff = (measured - expected).abs();
            assert!(diff < 1e-9 || (TAU - diff) < 1e-9, "t={t}");
        }
    }

    #[test]
    fn inclination_lifts_out_of_plane() {
        let o = orbit(std::f64::consts::FRAC_PI_2, 100.0, 10.0, 30.0);
        let p = orbital_position(&o, 0.0, 2.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 20.0 * 0.5).abs() < 1e-9);
        assert!((p.z - 20.0 * 30f64.to_radians().cos()).abs() < 1e-9);
        assert!((p.length() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn retrograde_orbit_runs_backwards() {
        // Triton-style inclination over 90° flips the apparent direction.
        let o = orbit(std::f64::consts::FRAC_PI_2, 5.9, 22.0, 157.0);
        let p = orbital_position(&o, 0.0, 1.0);
        assert!(p.z < 0.0);
    }

    #[test]
    fn ring_is_centered_on_parent() {
        let center = DVec3::new(50.0, 0.0, -20.0);
        let ring = orbit_ring(&orbit(0.0, 27.0, 12.0, 5.0), 1.0, 50, center);
        assert_eq!(ring.len(), 50);
        for p in ring {
            assert!(((p - center).length() - 12.0).abs() < 1e-9);
        }
    }
}
