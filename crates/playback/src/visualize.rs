//! Particle visualization of a cinematic's path.
//!
//! Replays the curve as particles instead of moving an actor: the sampled
//! transform each tick, markers for the governing prev/next position
//! keyframes, and a periodic sweep marking every keyframe. Particle
//! spawning is best-effort; failures are swallowed.

use camline_common::{TimeCode, Vec3};
use camline_timeline::Cinematic;
use tracing::warn;

use crate::actor::CommandError;

/// Best-effort particle output provided by the host.
pub trait ParticleSink {
    fn spawn_particle(&mut self, name: &str, pos: Vec3) -> Result<(), CommandError>;
}

/// Particle identifiers used when visualizing.
#[derive(Clone, Debug)]
pub struct VisualizeStyle {
    /// Emitted along the sampled curve.
    pub path: String,
    /// Periodic marker on every keyframe position.
    pub keyframe: String,
    /// Marker on the governing previous position keyframe.
    pub prev: String,
    /// Marker on the next position keyframe.
    pub next: String,
}

impl Default for VisualizeStyle {
    fn default() -> Self {
        Self {
            path: "minecraft:basic_flame_particle".to_string(),
            keyframe: "minecraft:endrod".to_string(),
            prev: "minecraft:villager_angry".to_string(),
            next: "minecraft:villager_happy".to_string(),
        }
    }
}

/// Seconds between keyframe-marker sweeps.
const MARKER_PERIOD_SECS: f64 = 1.0;

/// Replays a cinematic as particles under an external tick.
pub struct Visualizer {
    cin: Cinematic,
    time: TimeCode,
    speed: f64,
    style: VisualizeStyle,
    marker_elapsed: f64,
}

impl Visualizer {
    pub fn new(cin: Cinematic, start: TimeCode, speed: f64) -> Self {
        Self::with_style(cin, start, speed, VisualizeStyle::default())
    }

    pub fn with_style(cin: Cinematic, start: TimeCode, speed: f64, style: VisualizeStyle) -> Self {
        Self {
            cin,
            time: start,
            speed,
            style,
            // Fire the first keyframe sweep on the first tick.
            marker_elapsed: MARKER_PERIOD_SECS,
        }
    }

    pub fn time(&self) -> TimeCode {
        self.time
    }

    /// Advance by `delta` seconds and emit this tick's particles.
    /// Returns `false` once the end of the timeline has been passed.
    pub fn tick(&mut self, sink: &mut dyn ParticleSink, delta: f64) -> bool {
        self.time = self.time + TimeCode::from_secs(self.speed * delta);
        if self.time > self.cin.length() {
            return false;
        }

        self.marker_elapsed += delta;
        if self.marker_elapsed >= MARKER_PERIOD_SECS {
            self.marker_elapsed = 0.0;
            let line = self.cin.timeline().read();
            let marks: Vec<Vec3> = line
                .iter()
                .filter_map(|k| k.pos().map(|s| s.value))
                .collect();
            drop(line);
            for pos in marks {
                spawn(sink, &self.style.keyframe, pos);
            }
        }

        let line = self.cin.timeline().read();
        let prev = line
            .pos_keyframe_before(self.time, true, None)
            .and_then(|k| k.pos())
            .map(|s| s.value)
            .unwrap_or(Vec3::ZERO);
        let next = line
            .pos_keyframe_after(self.time, false, None)
            .and_then(|k| k.pos())
            .map(|s| s.value)
            .unwrap_or(Vec3::ZERO);
        drop(line);

        if let Some(transform) = self.cin.transform_at(self.time) {
            if transform.pos.is_finite() {
                spawn(sink, &self.style.path, transform.pos);
            }
        }
        spawn(sink, &self.style.prev, prev);
        spawn(sink, &self.style.next, next);

        true
    }
}

fn spawn(sink: &mut dyn ParticleSink, name: &str, pos: Vec3) {
    if let Err(err) = sink.spawn_particle(name, pos) {
        warn!(particle = name, error = %err, "Particle spawn failed; continuing");
    }
}
