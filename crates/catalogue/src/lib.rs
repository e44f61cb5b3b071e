//! Static data behind the orrery: the body catalogue, per-body material
//! compositions, the chemical formula color registry and a synthetic
//! nearby-star field for the star map.
//!
//! The built-in tables are RON assets compiled into the crate and validated
//! when loaded.

pub mod composition;
pub mod error;
pub mod formula;
pub mod star_field;
pub mod star_system;

pub use composition::*;
pub use error::*;
pub use formula::*;
pub use star_field::*;
pub use star_system::*;
