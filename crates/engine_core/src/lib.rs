//! Core types and utilities for the orrery.
//!
//! This crate provides the foundations used across all other crates:
//! - The view transform from 3D scene space to 2D screen space
//! - Frame time with a virtual (manual) clock option
//! - Easing helpers and tween records for animations
//! - RGBA colors

pub mod color;
pub mod easing;
pub mod time;
pub mod transform;
pub mod tween;

pub use color::*;
pub use easing::*;
pub use time::*;
pub use transform::*;
pub use tween::*;

// Re-export commonly used types
pub use glam::{DVec2, DVec3};
