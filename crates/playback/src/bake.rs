//! Baking: sample a cinematic at a fixed virtual step into a
//! frame-indexed command script.
//!
//! A bake is lazy, finite, and one-shot. `run_slice` processes frames until
//! its wall-clock budget is spent, then yields so long bakes never starve
//! the host scheduler; the caller resumes it on a later turn. The produced
//! script depends only on the cinematic and the step, never on how the
//! work was sliced.

use std::time::{Duration, Instant};

use camline_common::{BakeConfig, PlaybackConfig, TimeCode};
use camline_timeline::Cinematic;
use tracing::{debug, warn};

/// Progress of a cooperative bake.
#[derive(Clone, Debug)]
pub enum BakeProgress {
    /// More frames remain; call `run_slice` again on the next turn.
    Running {
        /// Fraction of the timeline already baked, in `[0, 1]`.
        fraction: f64,
    },
    /// The finished script, one line per emitted command.
    Done(String),
}

/// One-shot bake of a cinematic into an ordered command script.
pub struct Baker {
    cin: Cinematic,
    step: f64,
    frame: u64,
    last_command: Option<TimeCode>,
    script: String,
    budget: Duration,
    finished: bool,
}

impl Baker {
    /// Bake at an explicit virtual step (seconds per frame) with the
    /// default slice budget.
    pub fn new(cin: Cinematic, step: f64) -> Self {
        Self::with_config(cin, step, &BakeConfig::default())
    }

    pub fn with_config(cin: Cinematic, step: f64, config: &BakeConfig) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            warn!(step, "Invalid bake step; using one default tick");
            PlaybackConfig::default().tick_secs()
        };
        Self {
            cin,
            step,
            frame: 0,
            last_command: None,
            script: String::new(),
            budget: Duration::from_millis(config.yield_budget_ms),
            finished: false,
        }
    }

    /// Bake one frame per host tick, scaled by `speed`.
    pub fn from_speed(cin: Cinematic, speed: f64, playback: &PlaybackConfig) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            playback.default_speed
        };
        Self::new(cin, speed / playback.ticks_per_second as f64)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Fraction of the timeline already baked, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        let length = self.cin.length().as_secs();
        if length <= 0.0 || self.finished {
            return 1.0;
        }
        ((self.frame as f64 * self.step) / length).min(1.0)
    }

    /// Process frames until the slice budget is exhausted or the bake
    /// completes. At least one frame is processed per call, so progress is
    /// guaranteed under any budget.
    pub fn run_slice(&mut self) -> BakeProgress {
        if self.finished {
            return BakeProgress::Done(std::mem::take(&mut self.script));
        }

        let start = Instant::now();
        let length = self.cin.length().as_secs();

        loop {
            let time = self.frame as f64 * self.step;
            if time >= length {
                self.finished = true;
                debug!(
                    cinematic = %self.cin.id(),
                    frames = self.frame,
                    bytes = self.script.len(),
                    "Bake complete"
                );
                return BakeProgress::Done(std::mem::take(&mut self.script));
            }

            if let Some(transform) = self.cin.transform_at(TimeCode::from_secs(time)) {
                if let Some(cmd_kf) = &transform.cmd_keyframe {
                    if self.last_command != Some(cmd_kf.time()) {
                        self.last_command = Some(cmd_kf.time());
                        if cmd_kf.has_command() {
                            self.push_frame_command(cmd_kf.command());
                        }
                    }
                }
                let placement = self.cin.placement_command(&transform);
                self.push_frame_command(&placement);
            }
            self.frame += 1;

            if start.elapsed() >= self.budget {
                let fraction = self.fraction();
                debug!(cinematic = %self.cin.id(), fraction, "Bake slice yielded");
                return BakeProgress::Running { fraction };
            }
        }
    }

    fn push_frame_command(&mut self, command: &str) {
        self.script.push_str(&format!(
            "execute if score @s frame matches {} run {}\n",
            self.frame, command
        ));
    }
}
