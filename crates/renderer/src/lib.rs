//! Retained 2D rendering for the orrery views.
//!
//! Scenes are rebuilt into a layered [`DisplayList`] each frame, hit-tested
//! against pointer positions, and replayed onto any [`Canvas`] backend.

pub mod canvas;
pub mod display_list;
pub mod shape;

pub use canvas::*;
pub use display_list::*;
pub use shape::*;
