//! Cinematics: curve-kind selectors over a shared timeline, and the
//! transform reconstruction that samples them.
//!
//! `transform_at` is the heart of the engine. For a query time it:
//!
//! 1. Locates, independently for position and rotation, the governing
//!    keyframe at-or-before the query plus its strict predecessor, and the
//!    next two keyframes after the query.
//! 2. Synthesizes any missing neighbor at the timeline boundaries so the
//!    curve always has four control points.
//! 3. Normalizes the query into the current segment (with a minimum
//!    duration guard against coincident keyframes).
//! 4. Blends through the configured basis, or holds/lerps where the
//!    keyframe asks for it. Yaw goes through direction vectors to survive
//!    the ±180° wrap.

use std::sync::Arc;

use camline_common::{TimeCode, Vec3, BSPLINE, CATMULL_ROM, CUBIC, MIN_SEGMENT_SECS};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::curve::{blend_point, blend_value, direction_yaw, yaw_direction};
use crate::error::WireError;
use crate::keyframe::{Interpolation, Keyframe, Sample};
use crate::timeline::{JsonTimeline, Timeline};

/// Curve family used for one axis group (position or rotation).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CurveKind {
    /// Defer to each keyframe's own interpolation tag; untagged segments
    /// fall back to linear.
    #[default]
    Mixed,
    /// Bezier-style cubic through reordered control points.
    Cubic,
    /// Uniform cubic B-spline.
    Bspline,
}

impl From<CurveKind> for u8 {
    fn from(value: CurveKind) -> Self {
        match value {
            CurveKind::Mixed => 0,
            CurveKind::Cubic => 1,
            CurveKind::Bspline => 2,
        }
    }
}

impl TryFrom<u8> for CurveKind {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CurveKind::Mixed),
            1 => Ok(CurveKind::Cubic),
            2 => Ok(CurveKind::Bspline),
            other => Err(WireError::UnknownCurveKind(other)),
        }
    }
}

/// How the host should realize the computed transform.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayMode {
    /// Absolute placement each tick.
    #[default]
    Teleport,
    /// Eased free-camera placement.
    Camera,
}

impl From<PlayMode> for u8 {
    fn from(value: PlayMode) -> Self {
        match value {
            PlayMode::Teleport => 0,
            PlayMode::Camera => 1,
        }
    }
}

impl TryFrom<u8> for PlayMode {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PlayMode::Teleport),
            1 => Ok(PlayMode::Camera),
            other => Err(WireError::UnknownPlayMode(other)),
        }
    }
}

/// Ephemeral sample of a cinematic at one query time. Never persisted,
/// recomputed on every query.
#[derive(Clone, Debug)]
pub struct Transform {
    /// World position.
    pub pos: Vec3,
    /// Rotation: `x` is pitch, `y` is yaw, degrees.
    pub rot: Vec3,
    /// The position keyframe governing this sample (synthesized when the
    /// timeline had no real neighbor).
    pub pos_keyframe: Keyframe,
    /// The rotation keyframe governing this sample.
    pub rot_keyframe: Keyframe,
    /// Nearest command-carrying keyframe at or before the query time.
    pub cmd_keyframe: Option<Keyframe>,
}

/// A named cinematic: one timeline plus curve-kind and play-mode selectors.
///
/// The timeline handle is shared: `with_id`, `with_kinds`, and
/// `with_play_mode` derive a new `Cinematic` aliasing the SAME timeline.
/// Derived copies form one logical owner for mutation purposes — edit
/// through whichever handle, never concurrently.
#[derive(Clone, Debug)]
pub struct Cinematic {
    id: String,
    pos_kind: CurveKind,
    rot_kind: CurveKind,
    play_mode: PlayMode,
    timeline: Arc<RwLock<Timeline>>,
}

/// Persisted form of a cinematic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonCinematic {
    #[serde(rename = "posType")]
    pub pos_type: CurveKind,
    #[serde(rename = "rotType")]
    pub rot_type: CurveKind,
    /// Older blobs predate this field; missing means teleport.
    #[serde(rename = "playMode", default)]
    pub play_mode: PlayMode,
    pub timeline: JsonTimeline,
}

impl Cinematic {
    /// A new empty cinematic with mixed curves and teleport playback.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_parts(
            id,
            CurveKind::default(),
            CurveKind::default(),
            PlayMode::default(),
            Timeline::new(),
        )
    }

    pub fn with_parts(
        id: impl Into<String>,
        pos_kind: CurveKind,
        rot_kind: CurveKind,
        play_mode: PlayMode,
        timeline: Timeline,
    ) -> Self {
        Self {
            id: id.into(),
            pos_kind,
            rot_kind,
            play_mode,
            timeline: Arc::new(RwLock::new(timeline)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pos_kind(&self) -> CurveKind {
        self.pos_kind
    }

    pub fn rot_kind(&self) -> CurveKind {
        self.rot_kind
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// The shared timeline handle. See the type docs for the aliasing
    /// contract.
    pub fn timeline(&self) -> &Arc<RwLock<Timeline>> {
        &self.timeline
    }

    /// Current timeline length.
    pub fn length(&self) -> TimeCode {
        self.timeline.read().length()
    }

    /// Derive a copy under a new id, sharing the same timeline.
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }

    /// Derive a copy with new curve kinds, sharing the same timeline.
    pub fn with_kinds(&self, pos_kind: CurveKind, rot_kind: CurveKind) -> Self {
        Self {
            pos_kind,
            rot_kind,
            ..self.clone()
        }
    }

    /// Derive a copy with a new play mode, sharing the same timeline.
    pub fn with_play_mode(&self, play_mode: PlayMode) -> Self {
        Self {
            play_mode,
            ..self.clone()
        }
    }

    /// Reconstruct the camera transform at `time`.
    ///
    /// Returns `None` past the timeline's end — the expected end-of-playback
    /// signal, not an error. Inside the timeline a transform is always
    /// produced: missing neighbors are synthesized at the boundaries and a
    /// zero-length segment is widened to a minimum duration.
    pub fn transform_at(&self, time: TimeCode) -> Option<Transform> {
        let line = self.timeline.read();
        let length = line.length();
        let t = time.as_secs();

        if t > length.as_secs() {
            return None;
        }

        let curr_pos_k = line.pos_keyframe_before(time, true, None).cloned();
        let curr_rot_k = line.rot_keyframe_before(time, true, None).cloned();
        let prev_pos_k = line
            .pos_keyframe_before(time, false, curr_pos_k.as_ref().map(|k| k.time()))
            .cloned();
        let prev_rot_k = line
            .rot_keyframe_before(time, false, curr_rot_k.as_ref().map(|k| k.time()))
            .cloned();
        let next_pos_k = line.pos_keyframe_after(time, false, None).cloned();
        let next_rot_k = line.rot_keyframe_after(time, false, None).cloned();
        let next_pos2_k = line
            .pos_keyframe_after(time, false, next_pos_k.as_ref().map(|k| k.time()))
            .cloned();
        let next_rot2_k = line
            .rot_keyframe_after(time, false, next_rot_k.as_ref().map(|k| k.time()))
            .cloned();
        let cmd_keyframe = line.keyframe_before(time, true, |k| k.has_command()).cloned();
        drop(line);

        // Boundary synthesis: every missing neighbor becomes a keyframe at
        // the nearest boundary holding the nearest known value.
        let prev_pos_k = prev_pos_k.unwrap_or_else(|| {
            let value = curr_pos_k.as_ref().map(pos_value).unwrap_or(Vec3::ZERO);
            synth_pos(TimeCode::ZERO, value)
        });
        let prev_rot_k = prev_rot_k.unwrap_or_else(|| {
            let value = curr_rot_k.as_ref().map(rot_value).unwrap_or(Vec3::ZERO);
            synth_rot(TimeCode::ZERO, value)
        });
        let curr_pos_k =
            curr_pos_k.unwrap_or_else(|| synth_pos(TimeCode::ZERO, pos_value(&prev_pos_k)));
        let curr_rot_k =
            curr_rot_k.unwrap_or_else(|| synth_rot(TimeCode::ZERO, rot_value(&prev_rot_k)));
        let next_pos_k = next_pos_k.unwrap_or_else(|| synth_pos(length, pos_value(&curr_pos_k)));
        let next_rot_k = next_rot_k.unwrap_or_else(|| synth_rot(length, rot_value(&curr_rot_k)));
        let next_pos2_k =
            next_pos2_k.unwrap_or_else(|| synth_pos(length, pos_value(&next_pos_k)));
        let next_rot2_k =
            next_rot2_k.unwrap_or_else(|| synth_rot(length, rot_value(&next_rot_k)));

        let curr_pos = curr_pos_k
            .pos()
            .copied()
            .unwrap_or_else(|| Sample::new(Vec3::ZERO));
        let curr_rot = curr_rot_k
            .rot()
            .copied()
            .unwrap_or_else(|| Sample::new(Vec3::ZERO));

        let p_prev = pos_value(&prev_pos_k);
        let p_curr = curr_pos.value;
        let p_next = pos_value(&next_pos_k);
        let p_next2 = pos_value(&next_pos2_k);

        let r_prev = rot_value(&prev_rot_k);
        let r_curr = curr_rot.value;
        let r_next = rot_value(&next_rot_k);
        let r_next2 = rot_value(&next_rot2_k);

        let mut pd = next_pos_k.time().as_secs() - curr_pos_k.time().as_secs();
        if !pd.is_finite() || pd <= 0.0 {
            pd = MIN_SEGMENT_SECS;
        }
        let mut rd = next_rot_k.time().as_secs() - curr_rot_k.time().as_secs();
        if !rd.is_finite() || rd <= 0.0 {
            rd = MIN_SEGMENT_SECS;
        }
        let pt = (t - curr_pos_k.time().as_secs()) / pd;
        let rt = (t - curr_rot_k.time().as_secs()) / rd;

        let dir_prev = yaw_direction(r_prev);
        let dir_curr = yaw_direction(r_curr);
        let dir_next = yaw_direction(r_next);
        let dir_next2 = yaw_direction(r_next2);

        let pos = if curr_pos.constant {
            p_curr
        } else {
            match self.pos_kind {
                CurveKind::Bspline => {
                    blend_point(p_prev, p_curr, p_next, p_next2, pt, &BSPLINE, 1.0 / 6.0)
                }
                // The cubic basis takes its control points as
                // [curr, prev, next2, next]; the curve shape depends on
                // this order.
                CurveKind::Cubic => {
                    blend_point(p_curr, p_prev, p_next2, p_next, pt, &CUBIC, 1.0)
                }
                CurveKind::Mixed => match curr_pos.interp {
                    Interpolation::Catmull => {
                        blend_point(p_prev, p_curr, p_next, p_next2, pt, &CATMULL_ROM, 0.5)
                    }
                    Interpolation::Linear => p_curr.lerp(p_next, pt),
                },
            }
        };

        let (pitch, yaw_dir) = if curr_rot.constant {
            (r_curr.x, dir_curr)
        } else {
            match self.rot_kind {
                CurveKind::Bspline => (
                    blend_value(r_prev.x, r_curr.x, r_next.x, r_next2.x, rt, &BSPLINE, 1.0 / 6.0),
                    blend_point(dir_prev, dir_curr, dir_next, dir_next2, rt, &BSPLINE, 1.0 / 6.0),
                ),
                CurveKind::Cubic => (
                    blend_value(r_prev.x, r_curr.x, r_next.x, r_next2.x, rt, &CUBIC, 1.0),
                    blend_point(dir_prev, dir_curr, dir_next, dir_next2, rt, &CUBIC, 1.0),
                ),
                CurveKind::Mixed => match curr_rot.interp {
                    Interpolation::Catmull => (
                        blend_value(
                            r_prev.x, r_curr.x, r_next.x, r_next2.x, rt, &CATMULL_ROM, 0.5,
                        ),
                        blend_point(
                            dir_prev, dir_curr, dir_next, dir_next2, rt, &CATMULL_ROM, 0.5,
                        ),
                    ),
                    Interpolation::Linear => {
                        (r_curr.lerp(r_next, rt).x, dir_curr.lerp(dir_next, rt))
                    }
                },
            }
        };

        Some(Transform {
            pos,
            rot: Vec3::new(pitch, direction_yaw(yaw_dir), 0.0),
            pos_keyframe: curr_pos_k,
            rot_keyframe: curr_rot_k,
            cmd_keyframe,
        })
    }

    /// Render a transform as the host command realizing it under this
    /// cinematic's play mode.
    pub fn placement_command(&self, transform: &Transform) -> String {
        let p = transform.pos;
        let r = transform.rot;
        match self.play_mode {
            PlayMode::Teleport => {
                format!("tp {:.3} {:.3} {:.3} {:.3} {:.3}", p.x, p.y, p.z, r.y, r.x)
            }
            PlayMode::Camera => format!(
                "camera @s set minecraft:free ease 0.07 linear pos {:.3} {:.3} {:.3} rot {:.3} {:.3}",
                p.x, p.y, p.z, r.x, r.y
            ),
        }
    }

    pub fn to_json(&self) -> JsonCinematic {
        JsonCinematic {
            pos_type: self.pos_kind,
            rot_type: self.rot_kind,
            play_mode: self.play_mode,
            timeline: self.timeline.read().to_json(),
        }
    }

    pub fn from_json(id: impl Into<String>, json: &JsonCinematic) -> Result<Self, WireError> {
        Ok(Self::with_parts(
            id,
            json.pos_type,
            json.rot_type,
            json.play_mode,
            Timeline::from_json(&json.timeline)?,
        ))
    }
}

fn pos_value(k: &Keyframe) -> Vec3 {
    k.pos().map(|s| s.value).unwrap_or(Vec3::ZERO)
}

fn rot_value(k: &Keyframe) -> Vec3 {
    k.rot().map(|s| s.value).unwrap_or(Vec3::ZERO)
}

fn synth_pos(time: TimeCode, value: Vec3) -> Keyframe {
    Keyframe::at(time).with_pos(Sample::new(value))
}

fn synth_rot(time: TimeCode, value: Vec3) -> Keyframe {
    Keyframe::at(time).with_rot(Sample::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_pos(cin: &Cinematic, time: f64, pos: Vec3) {
        cin.timeline()
            .write()
            .add(Keyframe::at(TimeCode::from_secs(time)).with_pos(Sample::new(pos)));
    }

    fn add_pos_tagged(cin: &Cinematic, time: f64, pos: Vec3, interp: Interpolation) {
        cin.timeline()
            .write()
            .add(Keyframe::at(TimeCode::from_secs(time)).with_pos(Sample::with(pos, interp, false)));
    }

    fn add_rot(cin: &Cinematic, time: f64, pitch: f64, yaw: f64) {
        cin.timeline().write().add(
            Keyframe::at(TimeCode::from_secs(time))
                .with_rot(Sample::new(Vec3::new(pitch, yaw, 0.0))),
        );
    }

    #[test]
    fn mixed_untagged_is_linear() {
        let cin = Cinematic::new("linear");
        add_pos(&cin, 0.0, Vec3::ZERO);
        add_pos(&cin, 2.0, Vec3::new(10.0, 0.0, 0.0));

        let t = cin.transform_at(TimeCode::from_secs(1.0)).expect("transform");
        assert!((t.pos.x - 5.0).abs() < 1e-9);
        assert!(t.pos.y.abs() < 1e-9);
        assert!(t.pos.z.abs() < 1e-9);
    }

    #[test]
    fn past_the_end_is_none() {
        let cin = Cinematic::new("end");
        add_pos(&cin, 0.0, Vec3::ZERO);
        add_pos(&cin, 2.0, Vec3::new(1.0, 0.0, 0.0));

        assert!(cin.transform_at(TimeCode::from_secs(2.0)).is_some());
        assert!(cin.transform_at(TimeCode::from_secs(2.01)).is_none());
    }

    #[test]
    fn defined_across_whole_timeline() {
        let cin = Cinematic::new("dense");
        add_pos(&cin, 0.0, Vec3::ZERO);
        add_pos(&cin, 0.8, Vec3::new(-3.0, 10.0, 6.0));
        add_rot(&cin, 1.5, 30.0, 30.0);
        add_pos(&cin, 2.7, Vec3::new(-6.0, 14.0, 7.0));
        add_rot(&cin, 4.0, 30.0, 80.0);

        let length = cin.length().as_secs();
        let mut t = 0.0;
        while t <= length {
            assert!(
                cin.transform_at(TimeCode::from_secs(t)).is_some(),
                "no transform at {t}"
            );
            t += 0.1;
        }
    }

    #[test]
    fn sole_keyframe_reproduces_its_value_at_its_time() {
        let cin = Cinematic::new("sole");
        add_pos(&cin, 1.0, Vec3::new(3.0, 4.0, 5.0));

        let t = cin.transform_at(TimeCode::from_secs(1.0)).expect("transform");
        assert!((t.pos.x - 3.0).abs() < 1e-9);
        assert!((t.pos.y - 4.0).abs() < 1e-9);
        assert!((t.pos.z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn empty_timeline_evaluates_to_origin() {
        let cin = Cinematic::new("empty");
        let t = cin.transform_at(TimeCode::ZERO).expect("transform");
        assert_eq!(t.pos, Vec3::ZERO);
        assert!(t.rot.x.abs() < 1e-9);
    }

    #[test]
    fn catmull_tag_reproduces_control_point_at_its_time() {
        let cin = Cinematic::new("catmull");
        add_pos(&cin, 0.0, Vec3::new(0.0, 0.0, 0.0));
        add_pos_tagged(&cin, 1.0, Vec3::new(2.0, 5.0, -1.0), Interpolation::Catmull);
        add_pos(&cin, 2.0, Vec3::new(4.0, 0.0, 0.0));
        add_pos(&cin, 3.0, Vec3::new(6.0, 0.0, 0.0));

        let t = cin.transform_at(TimeCode::from_secs(1.0)).expect("transform");
        assert!((t.pos.x - 2.0).abs() < 1e-9);
        assert!((t.pos.y - 5.0).abs() < 1e-9);
        assert!((t.pos.z + 1.0).abs() < 1e-9);
    }

    #[test]
    fn bspline_on_collinear_uniform_points_stays_on_the_line() {
        let cin = Cinematic::new("bspline").with_kinds(CurveKind::Bspline, CurveKind::Mixed);
        for i in 0..4 {
            add_pos(&cin, i as f64, Vec3::new(i as f64, 0.0, 0.0));
        }

        let t = cin.transform_at(TimeCode::from_secs(1.0)).expect("transform");
        assert!((t.pos.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cubic_control_point_order_is_pinned() {
        let cin = Cinematic::new("cubic").with_kinds(CurveKind::Cubic, CurveKind::Mixed);
        add_pos(&cin, 0.0, Vec3::new(0.0, 0.0, 0.0));
        add_pos(&cin, 1.0, Vec3::new(1.0, 0.0, 0.0));
        add_pos(&cin, 2.0, Vec3::new(4.0, 0.0, 0.0));
        add_pos(&cin, 3.0, Vec3::new(9.0, 0.0, 0.0));

        // Bernstein weights at t=0.5 are [1/8, 3/8, 3/8, 1/8] over the
        // control order [curr, prev, next2, next] = [1, 0, 9, 4].
        let t = cin.transform_at(TimeCode::from_secs(1.5)).expect("transform");
        assert!((t.pos.x - 4.0).abs() < 1e-9, "got {}", t.pos.x);
    }

    #[test]
    fn constant_sample_holds_until_next() {
        let cin = Cinematic::new("hold");
        cin.timeline().write().add(
            Keyframe::at(TimeCode::ZERO)
                .with_pos(Sample::with(Vec3::new(7.0, 8.0, 9.0), Interpolation::Linear, true)),
        );
        add_pos(&cin, 2.0, Vec3::new(0.0, 0.0, 0.0));

        let mid = cin.transform_at(TimeCode::from_secs(1.0)).expect("transform");
        assert_eq!(mid.pos, Vec3::new(7.0, 8.0, 9.0));

        let late = cin.transform_at(TimeCode::from_secs(1.99)).expect("transform");
        assert_eq!(late.pos, Vec3::new(7.0, 8.0, 9.0));

        // The next keyframe is not constant, so its own time evaluates it.
        let end = cin.transform_at(TimeCode::from_secs(2.0)).expect("transform");
        assert_eq!(end.pos, Vec3::ZERO);
    }

    #[test]
    fn constant_rotation_holds() {
        let cin = Cinematic::new("hold-rot");
        cin.timeline().write().add(
            Keyframe::at(TimeCode::ZERO)
                .with_rot(Sample::with(Vec3::new(15.0, 45.0, 0.0), Interpolation::Linear, true)),
        );
        add_rot(&cin, 2.0, 0.0, 0.0);

        let mid = cin.transform_at(TimeCode::from_secs(1.0)).expect("transform");
        assert!((mid.rot.x - 15.0).abs() < 1e-9);
        assert!((mid.rot.y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn yaw_interpolates_through_the_wrap() {
        let cin = Cinematic::new("wrap");
        add_rot(&cin, 0.0, 0.0, 170.0);
        add_rot(&cin, 2.0, 0.0, -170.0);

        let t = cin.transform_at(TimeCode::from_secs(1.0)).expect("transform");
        let yaw = t.rot.y;
        // Midpoint through the wrap lands at ±180°, within ~10° of both
        // endpoints — never near the 0° a raw-angle lerp would give.
        assert!((yaw.abs() - 180.0).abs() < 1e-6, "got {yaw}");
    }

    #[test]
    fn pitch_lerps_independently_of_yaw() {
        let cin = Cinematic::new("pitch");
        add_rot(&cin, 0.0, 10.0, 0.0);
        add_rot(&cin, 2.0, 30.0, 0.0);

        let t = cin.transform_at(TimeCode::from_secs(1.0)).expect("transform");
        assert!((t.rot.x - 20.0).abs() < 1e-9);
        assert!(t.rot.y.abs() < 1e-9);
    }

    #[test]
    fn coincident_segment_gets_minimum_duration() {
        // The sole position keyframe sits exactly at the timeline's end, so
        // the synthesized next neighbor lands on the same time: a zero-
        // length segment that must be widened, not divided by.
        let cin = Cinematic::new("degenerate");
        add_pos(&cin, 2.0, Vec3::new(5.0, 6.0, 7.0));

        let t = cin.transform_at(TimeCode::from_secs(2.0)).expect("transform");
        assert!(t.pos.is_finite());
        assert_eq!(t.pos, Vec3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn command_keyframe_is_reported() {
        let cin = Cinematic::new("cmd");
        add_pos(&cin, 0.0, Vec3::ZERO);
        cin.timeline().write().add(
            Keyframe::at(TimeCode::from_secs(1.0)).with_command("say mark"),
        );
        add_pos(&cin, 2.0, Vec3::new(1.0, 0.0, 0.0));

        let before = cin.transform_at(TimeCode::from_secs(0.5)).expect("transform");
        assert!(before.cmd_keyframe.is_none());

        let after = cin.transform_at(TimeCode::from_secs(1.5)).expect("transform");
        let cmd = after.cmd_keyframe.expect("command keyframe");
        assert!((cmd.time().as_secs() - 1.0).abs() < 1e-9);
        assert_eq!(cmd.command(), "say mark");
    }

    #[test]
    fn derived_copies_share_the_timeline() {
        let cin = Cinematic::new("original");
        let derived = cin.with_id("copy").with_play_mode(PlayMode::Camera);

        add_pos(&derived, 1.0, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(cin.timeline().read().len(), 1);
        assert_eq!(derived.id(), "copy");
        assert_eq!(derived.play_mode(), PlayMode::Camera);
        assert_eq!(cin.play_mode(), PlayMode::Teleport);
    }

    #[test]
    fn json_roundtrip_preserves_settings_and_keyframes() {
        let cin = Cinematic::new("roundtrip")
            .with_kinds(CurveKind::Bspline, CurveKind::Cubic)
            .with_play_mode(PlayMode::Camera);
        add_pos_tagged(&cin, 0.8, Vec3::new(-3.0, 10.0, 6.0), Interpolation::Catmull);
        add_rot(&cin, 1.5, 30.0, 30.0);

        let json = cin.to_json();
        let restored = Cinematic::from_json("roundtrip", &json).expect("decode");

        assert_eq!(restored.pos_kind(), CurveKind::Bspline);
        assert_eq!(restored.rot_kind(), CurveKind::Cubic);
        assert_eq!(restored.play_mode(), PlayMode::Camera);
        assert_eq!(*restored.timeline().read(), *cin.timeline().read());
    }

    #[test]
    fn missing_play_mode_defaults_to_teleport() {
        let raw = r#"{"posType":1,"rotType":1,"timeline":{"0":{"p":[0,0,0,0],"r":[0,0,0]}}}"#;
        let json: JsonCinematic = serde_json::from_str(raw).expect("parse");
        let cin = Cinematic::from_json("legacy", &json).expect("decode");
        assert_eq!(cin.play_mode(), PlayMode::Teleport);
        assert_eq!(cin.pos_kind(), CurveKind::Cubic);
        assert_eq!(cin.timeline().read().len(), 1);
    }

    #[test]
    fn placement_commands_by_mode() {
        let cin = Cinematic::new("cmds");
        cin.timeline().write().add(
            Keyframe::at(TimeCode::ZERO)
                .with_pos(Sample::new(Vec3::new(1.0, 2.0, 3.0)))
                .with_rot(Sample::new(Vec3::new(10.0, 20.0, 0.0))),
        );
        let transform = cin.transform_at(TimeCode::ZERO).expect("transform");

        let tp = cin.placement_command(&transform);
        assert_eq!(tp, "tp 1.000 2.000 3.000 20.000 10.000");

        let cam = cin.with_play_mode(PlayMode::Camera).placement_command(&transform);
        assert!(cam.starts_with("camera @s set minecraft:free ease 0.07 linear pos"));
        assert!(cam.ends_with("rot 10.000 20.000"));
    }
}
