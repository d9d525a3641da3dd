//! Scheduler seam: repeating host callbacks without reading the wall clock.
//!
//! Tick logic throughout the engine takes explicit delta-time parameters;
//! only a `Scheduler` implementation touches real time. `ManualScheduler`
//! is the deterministic stand-in used in tests and embedding hosts that
//! drive time themselves.

use std::time::Duration;

/// Handle to a scheduled repeating callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(u64);

/// Repeating-callback scheduling, as offered by the host environment.
///
/// The callback receives the elapsed time since its previous invocation.
pub trait Scheduler {
    fn schedule_repeating(
        &mut self,
        interval: Duration,
        callback: Box<dyn FnMut(Duration)>,
    ) -> ScheduleHandle;

    fn cancel(&mut self, handle: ScheduleHandle);
}

struct Entry {
    handle: ScheduleHandle,
    interval: Duration,
    elapsed: Duration,
    callback: Box<dyn FnMut(Duration)>,
}

/// Deterministic scheduler driven by explicit [`advance`](Self::advance)
/// calls.
#[derive(Default)]
pub struct ManualScheduler {
    next_handle: u64,
    entries: Vec<Entry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance virtual time, firing each due callback once per elapsed
    /// interval, in registration order. A zero interval fires once per
    /// advance with the full delta.
    pub fn advance(&mut self, delta: Duration) {
        for entry in &mut self.entries {
            if entry.interval.is_zero() {
                (entry.callback)(delta);
                continue;
            }
            entry.elapsed += delta;
            while entry.elapsed >= entry.interval {
                entry.elapsed -= entry.interval;
                (entry.callback)(entry.interval);
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(
        &mut self,
        interval: Duration,
        callback: Box<dyn FnMut(Duration)>,
    ) -> ScheduleHandle {
        let handle = ScheduleHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            interval,
            elapsed: Duration::ZERO,
            callback,
        });
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        self.entries.retain(|e| e.handle != handle);
    }
}
