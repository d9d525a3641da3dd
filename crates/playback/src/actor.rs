//! The actor seam: how the driver reaches a host-controlled entity.
//!
//! The driver itself holds no per-actor playback state beyond command
//! de-duplication. The session markers live with the actor, so another
//! system taking control (clearing or retargeting the session) cancels
//! playback implicitly — the driver observes the mismatch on its next tick
//! and walks away.

use camline_common::Vec3;
use camline_timeline::PlayMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure surfaced by the host command channel.
///
/// Command side effects are best-effort; callers log and continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("command failed: {reason}")]
pub struct CommandError {
    pub reason: String,
}

impl CommandError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Playback markers tracked on an actor while a cinematic drives it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaySession {
    /// Id of the cinematic in control.
    pub cinematic_id: String,
    /// Virtual playback time in seconds.
    pub time: f64,
    /// Speed multiplier applied to wall-clock deltas.
    pub speed: f64,
    /// How transforms are realized for this run.
    pub mode: PlayMode,
}

/// A host entity the driver can project transforms onto.
pub trait Actor {
    /// Stable identifier, unique per actor.
    fn id(&self) -> &str;

    /// Project a freshly computed transform. `rot.x` is pitch, `rot.y` yaw.
    fn apply(&mut self, pos: Vec3, rot: Vec3, mode: PlayMode);

    /// Execute an opaque host command.
    fn run_command(&mut self, command: &str) -> Result<(), CommandError>;

    /// The playback session currently tracked on this actor, if any.
    fn session(&self) -> Option<PlaySession>;

    fn set_session(&mut self, session: PlaySession);

    fn clear_session(&mut self);
}
