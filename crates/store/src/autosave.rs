//! Editor autosave timing: pollable dirty-state + interval tracking.
//!
//! `AutoSaver` owns no thread or clock. The editing host advances it from
//! its own tick; when `should_save` reports true, the host saves the edited
//! cinematic under the configured suffix and calls `mark_saved`.

use camline_common::AutosaveConfig;
use tracing::debug;

/// Tracks whether an editing session is due for an autosave.
#[derive(Debug)]
pub struct AutoSaver {
    interval_secs: f64,
    suffix: String,
    elapsed: f64,
    dirty: bool,
    enabled: bool,
}

impl AutoSaver {
    pub fn new(config: &AutosaveConfig) -> Self {
        Self {
            interval_secs: config.interval_secs as f64,
            suffix: config.suffix.clone(),
            elapsed: 0.0,
            dirty: false,
            enabled: true,
        }
    }

    /// Key suffix autosave blobs should be stored under.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Advance the interval timer by `delta_secs` of host time.
    pub fn advance(&mut self, delta_secs: f64) {
        self.elapsed += delta_secs;
    }

    /// True when enabled, dirty, and a full interval has elapsed since the
    /// last save.
    pub fn should_save(&self) -> bool {
        self.enabled && self.dirty && self.elapsed >= self.interval_secs
    }

    /// Record an unsaved edit.
    pub fn mark_dirty(&mut self) {
        if !self.dirty {
            debug!("Editing session marked dirty");
        }
        self.dirty = true;
    }

    /// Record a completed save: clears the dirty flag and restarts the
    /// interval.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
        self.elapsed = 0.0;
        debug!("Editing session marked saved, timer reset");
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for AutoSaver {
    fn default() -> Self {
        Self::new(&AutosaveConfig::default())
    }
}
