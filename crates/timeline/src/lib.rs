//! `camline-timeline` — Keyframe timelines and cinematic curve evaluation.
//!
//! This crate turns a sparse, irregularly-timed set of keyframes into a
//! continuous camera transform. It handles:
//!
//! - **Keyframes**: position and/or rotation samples with per-sample
//!   interpolation tags, hold flags, and one-shot commands
//! - **Neighbor queries**: nearest-before/after lookups with inclusion,
//!   filtering, and exclusion options
//! - **Curve evaluation**: cubic, B-spline, Catmull-Rom, and mixed
//!   per-keyframe blending, with wrap-safe yaw handling
//! - **Persistence**: the compact JSON wire form of cinematics
//!
//! # Usage
//!
//! ```rust
//! use camline_common::{TimeCode, Vec3};
//! use camline_timeline::{Cinematic, Keyframe, Sample};
//!
//! let cin = Cinematic::new("intro");
//! cin.timeline().write().add(
//!     Keyframe::at(TimeCode::ZERO).with_pos(Sample::new(Vec3::ZERO)),
//! );
//! cin.timeline().write().add(
//!     Keyframe::at(TimeCode::from_secs(2.0))
//!         .with_pos(Sample::new(Vec3::new(10.0, 0.0, 0.0))),
//! );
//! let transform = cin.transform_at(TimeCode::from_secs(1.0)).unwrap();
//! assert_eq!(transform.pos, Vec3::new(5.0, 0.0, 0.0));
//! ```

pub mod cinematic;
pub mod curve;
pub mod error;
pub mod keyframe;
pub mod timeline;

// Re-export primary API
pub use cinematic::{Cinematic, CurveKind, JsonCinematic, PlayMode, Transform};
pub use curve::{blend_point, blend_value, direction_yaw, yaw_direction};
pub use error::WireError;
pub use keyframe::{Interpolation, JsonKeyframe, Keyframe, Sample};
pub use timeline::{JsonTimeline, Timeline};
