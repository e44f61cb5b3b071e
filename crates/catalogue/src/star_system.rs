//! The body catalogue: one star and its planets, each with optional moons.
//!
//! Orbits are simplified to inclined circles. Everything is in display
//! units: distances in scene units at scale 1, periods in simulated days,
//! sizes as pixel radii at scale 1.

use std::collections::HashSet;

use engine_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::CatalogueError;

const SOL_RON: &str = include_str!("../assets/sol.ron");

/// A planet or moon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    /// Orbital angle at time zero, radians.
    #[serde(default)]
    pub angle: f64,
    /// Orbital period in simulated days.
    pub period: f64,
    /// Orbit radius in scene units (relative to the parent for moons).
    pub distance: f64,
    /// Tilt of the orbital plane, degrees.
    #[serde(default)]
    pub orbital_inclination: f64,
    /// Display radius at scale 1.
    pub size: f64,
    /// `#RRGGBB`.
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moons: Vec<CelestialBody>,
}

impl CelestialBody {
    /// Parsed display color; neutral gray if the catalogue entry is malformed.
    pub fn color(&self) -> Color {
        Color::from_hex(&self.color).unwrap_or(Color::NEUTRAL_GRAY)
    }

    pub fn has_moons(&self) -> bool {
        !self.moons.is_empty()
    }

    /// Radius of the innermost moon orbit, if any.
    pub fn smallest_moon_distance(&self) -> Option<f64> {
        self.moons.iter().map(|m| m.distance).reduce(f64::min)
    }

    fn validate(&self) -> Result<(), CatalogueError> {
        if self.period.is_nan() || self.period <= 0.0 {
            return Err(CatalogueError::NonPositivePeriod {
                name: self.name.clone(),
                period: self.period,
            });
        }
        if self.distance < 0.0 || self.distance.is_nan() {
            return Err(CatalogueError::NegativeDistance {
                name: self.name.clone(),
                distance: self.distance,
            });
        }
        Color::from_hex(&self.color).map_err(|source| CatalogueError::BadColor {
            name: self.name.clone(),
            source,
        })?;
        Ok(())
    }
}

/// The central star. It sits at the origin and does not orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub name: String,
    pub size: f64,
    pub color: String,
    pub stroke_color: String,
}

impl Star {
    pub fn color(&self) -> Color {
        Color::from_hex(&self.color).unwrap_or(Color::WHITE)
    }

    pub fn stroke_color(&self) -> Color {
        Color::from_hex(&self.stroke_color).unwrap_or(Color::WHITE)
    }
}

/// A star and everything orbiting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub star: Star,
    pub planets: Vec<CelestialBody>,
}

impl StarSystem {
    /// The built-in Sol catalogue.
    pub fn sol() -> Result<Self, CatalogueError> {
        Self::from_ron_str(SOL_RON)
    }

    /// Parse and validate a catalogue written in RON.
    pub fn from_ron_str(data: &str) -> Result<Self, CatalogueError> {
        let system: StarSystem = ron::from_str(data).map_err(|source| CatalogueError::Parse {
            what: "star system",
            source,
        })?;
        system.validate()?;
        log::debug!(
            "loaded star system around {} with {} planets and {} moons",
            system.star.name,
            system.planets.len(),
            system.moon_count()
        );
        Ok(system)
    }

    /// Check periods, distances, colors and name uniqueness.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        for color in [&self.star.color, &self.star.stroke_color] {
            Color::from_hex(color).map_err(|source| CatalogueError::BadColor {
                name: self.star.name.clone(),
                source,
            })?;
        }

        let mut names = HashSet::new();
        names.insert(self.star.name.as_str());
        for (body, _) in self.bodies() {
            body.validate()?;
            if !names.insert(body.name.as_str()) {
                return Err(CatalogueError::DuplicateName(body.name.clone()));
            }
        }
        Ok(())
    }

    /// Every planet and moon with its parent, planets before their moons.
    pub fn bodies(&self) -> impl Iterator<Item = (&CelestialBody, Option<&CelestialBody>)> {
        self.planets.iter().flat_map(|planet| {
            std::iter::once((planet, None)).chain(planet.moons.iter().map(move |m| (m, Some(planet))))
        })
    }

    pub fn planet(&self, name: &str) -> Option<&CelestialBody> {
        self.planets.iter().find(|p| p.name == name)
    }

    /// Look up a planet or moon by name, with its parent for moons.
    pub fn find(&self, name: &str) -> Option<(&CelestialBody, Option<&CelestialBody>)> {
        self.bodies().find(|(body, _)| body.name == name)
    }

    pub fn moon_count(&self) -> usize {
        self.planets.iter().map(|p| p.moons.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, period: f64, distance: f64) -> String {
        format!(
            "(name: \"{name}\", period: {period:?}, distance: {distance:?}, size: 1.0, color: \"#FFFFFF\")"
        )
    }

    fn system(planets: &[String]) -> String {
        format!(
            "(star: (name: \"Sun\", size: 20.0, color: \"#FDB813\", stroke_color: \"#FFA500\"), planets: [{}])",
            planets.join(", ")
        )
    }

    #[test]
    fn sol_loads_and_is_consistent() {
        let sol = StarSystem::sol().unwrap();
        assert_eq!(sol.star.name, "Sun");
        let earth = sol.planet("Earth").unwrap();
        assert_eq!(earth.period, 365.0);
        assert_eq!(earth.distance, 100.0);
        assert_eq!(earth.moons[0].name, "Moon");

        let (moon, parent) = sol.find("Moon").unwrap();
        assert_eq!(moon.name, "Moon");
        assert_eq!(parent.map(|p| p.name.as_str()), Some("Earth"));
        assert!(sol.find("Vulcan").is_none());
    }

    #[test]
    fn bodies_lists_planets_before_their_moons() {
        let sol = StarSystem::sol().unwrap();
        let names: Vec<_> = sol.bodies().map(|(b, _)| b.name.as_str()).collect();
        let earth = names.iter().position(|n| *n == "Earth").unwrap();
        assert_eq!(names[earth + 1], "Moon");
        assert_eq!(names.len(), sol.planets.len() + sol.moon_count());
    }

    #[test]
    fn rejects_non_positive_period() {
        let data = system(&[body("Rock", 0.0, 10.0)]);
        assert!(matches!(
            StarSystem::from_ron_str(&data),
            Err(CatalogueError::NonPositivePeriod { .. })
        ));
    }

    #[test]
    fn rejects_negative_distance() {
        let data = system(&[body("Rock", 10.0, -1.0)]);
        assert!(matches!(
            StarSystem::from_ron_str(&data),
            Err(CatalogueError::NegativeDistance { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let data = system(&[body("Rock", 10.0, 1.0), body("Rock", 20.0, 2.0)]);
        assert!(matches!(
            StarSystem::from_ron_str(&data),
            Err(CatalogueError::DuplicateName(name)) if name == "Rock"
        ));
    }

    #[test]
    fn reports_parse_errors() {
        assert!(matches!(
            StarSystem::from_ron_str("(star: ())"),
            Err(CatalogueError::Parse { .. })
        ));
    }

    #[test]
    fn smallest_moon_distance() {
        let sol = StarSystem::sol().unwrap();
        assert_eq!(sol.planet("Mars").unwrap().smallest_moon_distance(), Some(8.0));
        assert_eq!(sol.planet("Venus").unwrap().smallest_moon_distance(), None);
    }
}
