//! Wall-clock abstraction.
//!
//! The runner samples the clock exactly once per tick and threads that single
//! `Millis` value through the whole engine call, so every age comparison in a
//! tick agrees on what "now" means.  Swapping in [`ManualClock`] makes a full
//! run deterministic without touching the engine.

use std::time::{SystemTime, UNIX_EPOCH};

use tm_core::Millis;

/// Source of the per-tick timestamp.
pub trait Clock {
    /// Current wall-clock time in epoch milliseconds.
    fn now(&mut self) -> Millis;
}

// ── SystemClock ───────────────────────────────────────────────────────────────

/// Real wall-clock time from the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Millis {
        // Pre-epoch system time degrades to 0 rather than failing the tick.
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Millis(ms)
    }
}

// ── ManualClock ───────────────────────────────────────────────────────────────

/// A clock advanced by hand.  Every `now()` call returns the current reading
/// and then steps it forward by `step_ms`, so consecutive ticks see evenly
/// spaced timestamps.
#[derive(Clone, Copy, Debug)]
pub struct ManualClock {
    current: Millis,
    step_ms: i64,
}

impl ManualClock {
    /// Start at `start` and advance `step_ms` per reading.
    pub fn new(start: Millis, step_ms: i64) -> Self {
        Self { current: start, step_ms }
    }

    /// A clock pinned at `at` that never advances on its own.
    pub fn fixed(at: Millis) -> Self {
        Self { current: at, step_ms: 0 }
    }

    /// Jump the clock to `to` without producing a reading.
    pub fn set(&mut self, to: Millis) {
        self.current = to;
    }

    /// The reading the next `now()` call will return.
    pub fn peek(&self) -> Millis {
        self.current
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Millis {
        let reading = self.current;
        self.current = self.current + self.step_ms;
        reading
    }
}
