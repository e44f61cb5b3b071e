//! The catalogue flattened into an indexed body table.
//!
//! Every body gets a [`BodyId`]; the star is always [`BodyId::STAR`]. All
//! per-body state elsewhere in the engine is keyed by id, so lookups never
//! scan the catalogue by name.

use std::collections::HashMap;

use catalogue::StarSystem;
use engine_core::{Color, DVec3};

use crate::orbit::{orbital_position, Orbit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u16);

impl BodyId {
    pub const STAR: BodyId = BodyId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        BodyId(index as u16)
    }

    pub fn is_star(self) -> bool {
        self == Self::STAR
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub parent: Option<BodyId>,
    /// `None` for the star, which sits at the origin.
    pub orbit: Option<Orbit>,
    pub size: f64,
    pub color: Color,
    /// Star outline; bodies use a white rim instead.
    pub stroke_color: Option<Color>,
    pub moons: Vec<BodyId>,
}

impl Body {
    /// On-screen orbit radius at `scale`, zero for the star.
    pub fn orbit_radius(&self, scale: f64) -> f64 {
        self.orbit.map_or(0.0, |o| o.distance * scale)
    }
}

#[derive(Debug, Clone)]
pub struct SolarSystem {
    bodies: Vec<Body>,
    by_name: HashMap<String, BodyId>,
}

impl SolarSystem {
    pub fn new(system: &StarSystem) -> Self {
        let mut bodies = vec![Body {
            id: BodyId::STAR,
            name: system.star.name.clone(),
            kind: BodyKind::Star,
            parent: None,
            orbit: None,
            size: system.star.size,
            color: system.star.color(),
            stroke_color: Some(system.star.stroke_color()),
            moons: Vec::new(),
        }];

        for planet in &system.planets {
            let planet_id = BodyId::from_index(bodies.len());
            bodies.push(Body {
                id: planet_id,
                name: planet.name.clone(),
                kind: BodyKind::Planet,
                parent: None,
                orbit: Some(Orbit::from(planet)),
                size: planet.size,
                color: planet.color(),
                stroke_color: None,
                moons: Vec::new(),
            });
            for moon in &planet.moons {
                let moon_id = BodyId::from_index(bodies.len());
                bodies.push(Body {
                    id: moon_id,
                    name: moon.name.clone(),
                    kind: BodyKind::Moon,
                    parent: Some(planet_id),
                    orbit: Some(Orbit::from(moon)),
                    size: moon.size,
                    color: moon.color(),
                    stroke_color: None,
                    moons: Vec::new(),
                });
                bodies[planet_id.index()].moons.push(moon_id);
            }
        }

        let by_name = bodies.iter().map(|b| (b.name.clone(), b.id)).collect();
        Self { bodies, by_name }
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn star(&self) -> &Body {
        &self.bodies[0]
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn kind(&self, id: BodyId) -> Option<BodyKind> {
        self.get(id).map(|b| b.kind)
    }

    pub fn name(&self, id: BodyId) -> &str {
        self.get(id).map_or("?", |b| b.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn planets(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.kind == BodyKind::Planet)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Scene position of a body at simulated `time`, moons offset by their parent.
    pub fn position(&self, id: BodyId, time: f64, scale: f64) -> DVec3 {
        let Some(body) = self.get(id) else {
            return DVec3::ZERO;
        };
        let own = body
            .orbit
            .map_or(DVec3::ZERO, |orbit| orbital_position(&orbit, time, scale));
        match body.parent {
            Some(parent) => own + self.position(parent, time, scale),
            None => own,
        }
    }
}
