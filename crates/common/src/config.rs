//! Configuration for playback, baking, and editor autosave.

use serde::{Deserialize, Serialize};

/// Host tick cadence and playback defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Host scheduler ticks per second.
    pub ticks_per_second: u32,
    /// Playback speed multiplier used when the caller gives none.
    pub default_speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 20,
            default_speed: 1.0,
        }
    }
}

impl PlaybackConfig {
    /// Duration of one host tick in seconds.
    pub fn tick_secs(&self) -> f64 {
        1.0 / self.ticks_per_second as f64
    }
}

/// Baking behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BakeConfig {
    /// Wall-clock budget per cooperative bake slice, in milliseconds. The
    /// baker yields back to the scheduler once a slice exceeds this.
    pub yield_budget_ms: u64,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            yield_budget_ms: 200,
        }
    }
}

/// Editor autosave cadence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Seconds between autosaves of a dirty editing session.
    pub interval_secs: u32,
    /// Key suffix autosave blobs are stored under.
    pub suffix: String,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            suffix: "_autosave".to_string(),
        }
    }
}
