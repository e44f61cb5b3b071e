//! Interactive orrery: a projected solar system with animated recentering,
//! hover-expanded bodies and composition rings, plus a nearby-star map.
//!
//! [`Orrery`] owns all engine state. Feed it pointer and wheel input, call
//! [`Orrery::frame`] once per display refresh, and it paints onto any
//! [`renderer::Canvas`].

pub mod body_state;
pub mod center;
pub mod composition;
pub mod config;
pub mod controls;
pub mod frame;
pub mod hover;
pub mod hover_anim;
pub mod orbit;
pub mod scene;
pub mod simulation;
pub mod star_map;
pub mod state;
pub mod system;

pub use body_state::{BodyState, BodyStates};
pub use center::CenterTransition;
pub use config::OrreryConfig;
pub use controls::{Controls, Readouts};
pub use frame::FrameOutcome;
pub use hover::{HitArea, HitAreas, HitTag, HoverChange};
pub use hover_anim::{HoverAnimations, HoverState};
pub use orbit::{orbital_position, Orbit};
pub use simulation::{SimulationState, ViewMode};
pub use star_map::{StarMap, StarMapSummary};
pub use state::Orrery;
pub use system::{Body, BodyId, BodyKind, SolarSystem};
