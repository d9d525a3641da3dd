//! Keyframes: a timestamped position and/or rotation sample, optionally
//! carrying a one-shot command.
//!
//! A keyframe may hold a position sample, a rotation sample, both, or
//! neither (a pure command marker). Times are quantized to the centisecond
//! grid on construction so equality is well-defined for timeline keys.

use camline_common::{TimeCode, TimeKey, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::WireError;

/// How a keyframe's sample blends toward its successor when the owning
/// cinematic's curve kind is mixed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Interpolation {
    /// Straight-line blend to the next sample.
    #[default]
    Linear,
    /// Catmull-Rom blend through the neighboring samples.
    Catmull,
}

impl From<Interpolation> for u8 {
    fn from(value: Interpolation) -> Self {
        match value {
            Interpolation::Linear => 0,
            Interpolation::Catmull => 1,
        }
    }
}

impl TryFrom<u8> for Interpolation {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Interpolation::Linear),
            1 => Ok(Interpolation::Catmull),
            other => Err(WireError::UnknownInterpolation(other)),
        }
    }
}

/// One channel sample on a keyframe (position or rotation).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Sampled value. For rotation, `x` is pitch and `y` is yaw in degrees.
    pub value: Vec3,
    /// Blend mode toward the next sample under mixed curves.
    pub interp: Interpolation,
    /// Hold this value as-is until the next non-constant sample.
    pub constant: bool,
}

impl Sample {
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            interp: Interpolation::default(),
            constant: false,
        }
    }

    pub fn with(value: Vec3, interp: Interpolation, constant: bool) -> Self {
        Self {
            value,
            interp,
            constant,
        }
    }
}

/// A timestamped sample of position and/or rotation with an optional
/// one-shot command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframe {
    time: TimeCode,
    pos: Option<Sample>,
    rot: Option<Sample>,
    command: String,
}

impl Keyframe {
    /// Create an empty keyframe at the given time (quantized to the
    /// centisecond grid).
    pub fn at(time: TimeCode) -> Self {
        Self {
            time: time.quantized(),
            pos: None,
            rot: None,
            command: String::new(),
        }
    }

    pub fn with_pos(mut self, sample: Sample) -> Self {
        self.pos = Some(sample);
        self
    }

    pub fn with_rot(mut self, sample: Sample) -> Self {
        self.rot = Some(sample);
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn time(&self) -> TimeCode {
        self.time
    }

    /// Timeline map key for this keyframe.
    pub fn key(&self) -> TimeKey {
        TimeKey::from_timecode(self.time)
    }

    pub fn pos(&self) -> Option<&Sample> {
        self.pos.as_ref()
    }

    pub fn rot(&self) -> Option<&Sample> {
        self.rot.as_ref()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn has_command(&self) -> bool {
        !self.command.is_empty()
    }

    /// The same keyframe relocated to a new (quantized) time.
    pub fn at_time(&self, time: TimeCode) -> Self {
        Self {
            time: time.quantized(),
            ..self.clone()
        }
    }

    /// The same keyframe with the position sample's interpolation replaced.
    /// No-op when there is no position sample.
    pub fn with_pos_interp(&self, interp: Interpolation) -> Self {
        let mut out = self.clone();
        if let Some(sample) = &mut out.pos {
            sample.interp = interp;
        }
        out
    }

    /// The same keyframe with the rotation sample's interpolation replaced.
    /// No-op when there is no rotation sample.
    pub fn with_rot_interp(&self, interp: Interpolation) -> Self {
        let mut out = self.clone();
        if let Some(sample) = &mut out.rot {
            sample.interp = interp;
        }
        out
    }

    /// The same keyframe moved to a new position, keeping the sample's
    /// interpolation and hold flag (defaults when there was none).
    pub fn moved_to(&self, pos: Vec3) -> Self {
        let mut out = self.clone();
        match &mut out.pos {
            Some(sample) => sample.value = pos,
            None => out.pos = Some(Sample::new(pos)),
        }
        out
    }

    /// The same keyframe with a new rotation, keeping the sample's
    /// interpolation and hold flag (defaults when there was none).
    pub fn rotated(&self, rot: Vec3) -> Self {
        let mut out = self.clone();
        match &mut out.rot {
            Some(sample) => sample.value = rot,
            None => out.rot = Some(Sample::new(rot)),
        }
        out
    }

    /// Compact persisted form. Values are floored to millisecond precision;
    /// the command is omitted when empty.
    pub fn to_json(&self) -> JsonKeyframe {
        let mut out = JsonKeyframe::default();
        if let Some(p) = &self.pos {
            let v = p.value.map(floor_millis);
            out.p = Some((p.interp, v.x, v.y, v.z));
            out.pc = Some(p.constant);
        }
        if let Some(r) = &self.rot {
            out.r = Some((r.interp, floor_millis(r.value.x), floor_millis(r.value.y)));
            out.rc = Some(r.constant);
        }
        if !self.command.is_empty() {
            out.cmd = Some(self.command.clone());
        }
        out
    }

    /// Rebuild from the persisted form. Every field is optional on read.
    pub fn from_json(time: TimeCode, json: &JsonKeyframe) -> Self {
        let mut kf = Keyframe::at(time);
        if let Some((interp, x, y, z)) = json.p {
            kf.pos = Some(Sample::with(
                Vec3::new(x, y, z),
                interp,
                json.pc.unwrap_or(false),
            ));
        }
        if let Some((interp, pitch, yaw)) = json.r {
            kf.rot = Some(Sample::with(
                Vec3::new(pitch, yaw, 0.0),
                interp,
                json.rc.unwrap_or(false),
            ));
        }
        if let Some(cmd) = &json.cmd {
            kf.command = cmd.clone();
        }
        kf
    }
}

/// Compact wire form of a keyframe.
///
/// `p` is `[interp, x, y, z]`, `r` is `[interp, pitch, yaw]`; `pc`/`rc` are
/// the hold flags. Absent fields mean the keyframe carries no such sample.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonKeyframe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<(Interpolation, f64, f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<(Interpolation, f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}

fn floor_millis(v: f64) -> f64 {
    (v * 1000.0).floor() / 1000.0
}
