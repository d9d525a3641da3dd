//! `camline-playback` — Drives cinematics across time.
//!
//! Two ways to consume a cinematic's curve:
//!
//! - **Interactive playback**: [`Driver`] advances an [`Actor`]'s virtual
//!   time each scheduler turn, projects the transform onto it, and fires
//!   keyframe commands exactly once as they are crossed.
//! - **Baking**: [`Baker`] samples the curve at a fixed virtual step into a
//!   frame-indexed command script, yielding cooperatively on long bakes.
//!
//! [`Visualizer`] additionally replays the path as particles for authoring,
//! and [`Scheduler`] is the seam to the host's repeating-callback facility.

pub mod actor;
pub mod bake;
pub mod driver;
pub mod scheduler;
pub mod visualize;

// Re-export primary API
pub use actor::{Actor, CommandError, PlaySession};
pub use bake::{BakeProgress, Baker};
pub use driver::Driver;
pub use scheduler::{ManualScheduler, ScheduleHandle, Scheduler};
pub use visualize::{ParticleSink, Visualizer, VisualizeStyle};
