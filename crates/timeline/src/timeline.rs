//! The ordered keyframe timeline and its neighbor queries.

use std::collections::BTreeMap;

use camline_common::{TimeCode, TimeKey};

use crate::error::WireError;
use crate::keyframe::{JsonKeyframe, Keyframe};

/// Ordered collection of keyframes keyed by quantized time.
///
/// Insertion order is irrelevant; adding a keyframe on an occupied
/// centisecond replaces the previous one. The timeline's length is derived
/// from its largest key, never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    keyframes: BTreeMap<TimeKey, Keyframe>,
}

/// Persisted form: rounded-time string key to keyframe.
pub type JsonTimeline = BTreeMap<String, JsonKeyframe>;

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyframe, replacing any existing keyframe at the same
    /// quantized time.
    pub fn add(&mut self, keyframe: Keyframe) {
        self.keyframes.insert(keyframe.key(), keyframe);
    }

    /// Remove and return the keyframe at the given time, if present.
    pub fn remove(&mut self, time: TimeCode) -> Option<Keyframe> {
        self.keyframes.remove(&TimeKey::from_timecode(time))
    }

    /// The keyframe at exactly the given (quantized) time.
    pub fn get_at(&self, time: TimeCode) -> Option<&Keyframe> {
        self.keyframes.get(&TimeKey::from_timecode(time))
    }

    /// Keyframes in time order.
    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.values()
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Largest keyframe time present, or zero when empty.
    pub fn length(&self) -> TimeCode {
        self.keyframes
            .keys()
            .next_back()
            .map(|k| k.as_timecode())
            .unwrap_or(TimeCode::ZERO)
    }

    /// Nearest keyframe with time greater than `time` (or equal, when
    /// `include_equal`) that passes `filter`.
    pub fn keyframe_after(
        &self,
        time: TimeCode,
        include_equal: bool,
        filter: impl Fn(&Keyframe) -> bool,
    ) -> Option<&Keyframe> {
        let t = time.as_secs();
        self.keyframes.values().find(|k| {
            let kt = k.time().as_secs();
            (kt > t || (include_equal && kt == t)) && filter(k)
        })
    }

    /// Nearest keyframe with time less than `time` (or equal, when
    /// `include_equal`) that passes `filter`.
    pub fn keyframe_before(
        &self,
        time: TimeCode,
        include_equal: bool,
        filter: impl Fn(&Keyframe) -> bool,
    ) -> Option<&Keyframe> {
        let t = time.as_secs();
        self.keyframes.values().rev().find(|k| {
            let kt = k.time().as_secs();
            (kt < t || (include_equal && kt == t)) && filter(k)
        })
    }

    /// Nearest position-carrying keyframe after `time`, optionally skipping
    /// the keyframe at `ignore` (used to reach the second-nearest neighbor).
    pub fn pos_keyframe_after(
        &self,
        time: TimeCode,
        include_equal: bool,
        ignore: Option<TimeCode>,
    ) -> Option<&Keyframe> {
        self.keyframe_after(time, include_equal, |k| {
            k.pos().is_some() && Some(k.time()) != ignore
        })
    }

    /// Nearest position-carrying keyframe before `time`, optionally
    /// skipping the keyframe at `ignore`.
    pub fn pos_keyframe_before(
        &self,
        time: TimeCode,
        include_equal: bool,
        ignore: Option<TimeCode>,
    ) -> Option<&Keyframe> {
        self.keyframe_before(time, include_equal, |k| {
            k.pos().is_some() && Some(k.time()) != ignore
        })
    }

    /// Nearest rotation-carrying keyframe after `time`, optionally skipping
    /// the keyframe at `ignore`.
    pub fn rot_keyframe_after(
        &self,
        time: TimeCode,
        include_equal: bool,
        ignore: Option<TimeCode>,
    ) -> Option<&Keyframe> {
        self.keyframe_after(time, include_equal, |k| {
            k.rot().is_some() && Some(k.time()) != ignore
        })
    }

    /// Nearest rotation-carrying keyframe before `time`, optionally
    /// skipping the keyframe at `ignore`.
    pub fn rot_keyframe_before(
        &self,
        time: TimeCode,
        include_equal: bool,
        ignore: Option<TimeCode>,
    ) -> Option<&Keyframe> {
        self.keyframe_before(time, include_equal, |k| {
            k.rot().is_some() && Some(k.time()) != ignore
        })
    }

    /// Persisted form: keys are keyframe times rounded to milliseconds.
    pub fn to_json(&self) -> JsonTimeline {
        self.keyframes
            .values()
            .map(|k| (format_time_key(k.time()), k.to_json()))
            .collect()
    }

    /// Rebuild from the persisted form. A key that does not parse as a
    /// number aborts the whole decode.
    pub fn from_json(json: &JsonTimeline) -> Result<Self, WireError> {
        let mut line = Timeline::new();
        for (key, jk) in json {
            let time: f64 = key
                .parse()
                .map_err(|_| WireError::InvalidTimeKey(key.clone()))?;
            line.add(Keyframe::from_json(TimeCode::from_secs(time), jk));
        }
        Ok(line)
    }
}

fn format_time_key(time: TimeCode) -> String {
    let rounded = (time.as_secs() * 1000.0).round() / 1000.0;
    format!("{rounded}")
}
