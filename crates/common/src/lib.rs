//! `camline-common` — Shared types and math for the Camline cinematic engine.
//!
//! This crate is the foundation the other engine crates depend on. It
//! defines the core abstractions:
//!
//! - **Types**: `TimeCode`, `TimeKey`, `Vec3` (newtypes for safety)
//! - **Matrices**: `Matrix`, the fixed cubic / B-spline / Catmull-Rom bases,
//!   and the power-row weight computation
//! - **Config**: `PlaybackConfig`, `BakeConfig`, `AutosaveConfig`

pub mod config;
pub mod matrix;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AutosaveConfig, BakeConfig, PlaybackConfig};
pub use matrix::{power_row, weights, Basis, Matrix, BSPLINE, CATMULL_ROM, CUBIC};
pub use types::{TimeCode, TimeKey, Vec3};

/// Minimum segment duration in seconds, substituted when the two keyframes
/// bounding a curve segment coincide. Keeps the local parameter finite.
pub const MIN_SEGMENT_SECS: f64 = 0.05;
