//! Synthetic nearby-star field for the star map.
//!
//! Positions are heliocentric in parsecs, like a real catalogue; `dist` is
//! the distance from the Sun in light years so it can be compared directly
//! with the viewer's distance limit. The Sun itself is entry zero with
//! `dist == 0`.

use glam::DVec3;
use rand::prelude::*;

/// Light years per parsec.
pub const PARSECS_TO_LY: f64 = 3.26156;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogueStar {
    /// Heliocentric position, parsecs.
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Distance from the Sun, light years.
    pub dist: f64,
    /// Apparent visual magnitude (lower is brighter).
    pub mag: f64,
    /// B−V color index.
    pub ci: f64,
}

impl CatalogueStar {
    pub fn position_pc(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StarField {
    pub stars: Vec<CatalogueStar>,
}

impl StarField {
    /// `count` stars spread uniformly through a sphere of `radius_ly`, plus the Sun.
    pub fn generate(seed: u64, count: usize, radius_ly: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let radius_pc = radius_ly / PARSECS_TO_LY;

        let mut stars = Vec::with_capacity(count + 1);
        stars.push(CatalogueStar {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            dist: 0.0,
            mag: -26.7,
            ci: 0.656,
        });

        while stars.len() < count + 1 {
            // Rejection sample the unit ball so density is even.
            let p = DVec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
            );
            let len = p.length();
            if len > 1.0 || len < 1e-3 {
                continue;
            }
            let pos = p * radius_pc;

            // Nearby stars are mostly faint red dwarfs.
            let mag = if rng.gen_bool(0.1) {
                rng.gen_range(-1.5..2.5)
            } else {
                rng.gen_range(2.5..12.0)
            };
            let ci = if rng.gen_bool(0.15) {
                rng.gen_range(-0.3..0.5)
            } else {
                rng.gen_range(0.5..2.0)
            };

            stars.push(CatalogueStar {
                x: pos.x,
                y: pos.y,
                z: pos.z,
                dist: pos.length() * PARSECS_TO_LY,
                mag,
                ci,
            });
        }

        log::debug!("generated {} stars within {radius_ly} ly", stars.len());
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Stars with `0 < dist <= max_distance`.
    pub fn within(&self, max_distance: f64) -> impl Iterator<Item = &CatalogueStar> {
        self.stars
            .iter()
            .filter(move |s| s.dist > 0.0 && s.dist <= max_distance)
    }
}
