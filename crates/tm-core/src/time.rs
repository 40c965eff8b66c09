//! Simulation time model.
//!
//! # Design
//!
//! Two notions of time coexist in the engine:
//!
//! - [`Tick`] — a monotonically increasing step counter.  Each call to the
//!   engine's advance function represents exactly one tick, regardless of how
//!   much wall-clock time elapsed since the previous call; there is no drift
//!   compensation or catch-up.
//! - [`Millis`] — a wall-clock timestamp in epoch milliseconds.  Queue
//!   entries carry their arrival `Millis` and complete once their age exceeds
//!   the effective validation latency.  The runner samples `Millis` exactly
//!   once per tick and threads that single value through the whole engine
//!   call, so every age comparison within a tick sees a consistent "now".
//!
//! [`TickPace`] maps the debug fast/slow toggle to the real-time interval a
//! runner sleeps between ticks.  The interval affects pacing only, never the
//! per-tick arithmetic.

use std::fmt;

use rust_decimal::Decimal;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at the fast pace of 10 ticks/second a u64 lasts ~58
/// billion years, so overflow is not a practical concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Millis ───────────────────────────────────────────────────────────────────

/// A wall-clock timestamp in milliseconds since the Unix epoch.
///
/// Signed so that differences and pre-epoch test fixtures are representable
/// without casts.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub i64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Widen to a [`Decimal`] for latency arithmetic.
    ///
    /// Validation latency is a decimal (upgrades discount it by 0.99 per
    /// level, producing fractional milliseconds); age comparisons therefore
    /// happen in decimal space rather than rounding the latency to integer
    /// milliseconds.
    #[inline]
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl std::ops::Add<i64> for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: i64) -> Millis {
        Millis(self.0 + rhs)
    }
}

impl std::ops::Sub for Millis {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Millis) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── TickPace ─────────────────────────────────────────────────────────────────

/// Real-time cadence between ticks.
///
/// `Fast` is normal play; `Slow` is the debug "slow ticks" mode that makes
/// individual ticks observable by eye.  Only the runner's sleep interval
/// changes — each tick performs identical work at either pace.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPace {
    #[default]
    Fast,
    Slow,
}

impl TickPace {
    /// Milliseconds a runner waits between ticks at this pace.
    #[inline]
    pub fn interval_ms(self) -> u64 {
        match self {
            TickPace::Fast => 100,
            TickPace::Slow => 1_000,
        }
    }
}
