//! `GameLoop` — the single-writer tick driver.

use std::thread;
use std::time::Duration;

use tm_core::{Tick, TickPace};
use tm_engine::{TickEngine, TickReport, Upgrade};

use crate::{Clock, SimObserver, SimResult, StateStore};

/// Drives the engine one tick at a time against a [`StateStore`].
///
/// The loop is the only writer: each tick samples the clock once, computes the
/// next snapshot through [`TickEngine::advance`], and replaces the store's
/// state wholesale.  Purchases go through the same store between ticks, so
/// ticks and purchases are strictly serialized.
///
/// `run_ticks` steps as fast as the caller lets it; [`run_for`] inserts a
/// real-time sleep of [`TickPace::interval_ms`] after every tick.
///
/// [`run_for`]: GameLoop::run_for
pub struct GameLoop<C: Clock> {
    engine: TickEngine,
    store:  StateStore,
    clock:  C,
    pace:   TickPace,

    /// Call `on_snapshot` every this many ticks.  0 disables snapshots.
    snapshot_interval: u64,
}

impl<C: Clock> GameLoop<C> {
    /// Build a loop starting from the engine's initial state, fast pace,
    /// snapshots disabled.
    pub fn new(engine: TickEngine, clock: C) -> Self {
        let store = StateStore::new(engine.initial_state());
        Self {
            engine,
            store,
            clock,
            pace: TickPace::default(),
            snapshot_interval: 0,
        }
    }

    /// Replace the tick cadence used by [`run_for`][GameLoop::run_for].
    pub fn with_pace(mut self, pace: TickPace) -> Self {
        self.pace = pace;
        self
    }

    /// Emit `on_snapshot` every `interval` ticks (0 disables).
    pub fn with_snapshot_interval(mut self, interval: u64) -> Self {
        self.snapshot_interval = interval;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn engine(&self) -> &TickEngine {
        &self.engine
    }

    #[inline]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Mutable store access, for registering subscribers before a run.
    #[inline]
    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    #[inline]
    pub fn pace(&self) -> TickPace {
        self.pace
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Advance exactly one tick and replace the stored snapshot.
    pub fn tick_once<O: SimObserver>(&mut self, observer: &mut O) -> TickReport {
        let now = self.clock.now();
        let tick = self.store.current().ticks;

        observer.on_tick_start(tick);
        let (next, report) = self.engine.advance(self.store.current(), now);
        self.store.replace(next);
        observer.on_tick_end(tick, &report);

        let done = self.store.current().ticks;
        if self.snapshot_interval > 0 && done.0.is_multiple_of(self.snapshot_interval) {
            observer.on_snapshot(done, self.store.current());
        }
        report
    }

    /// Run `n` ticks back-to-back with no pacing.  Used by tests and batch
    /// simulation; does not emit `on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick_once(observer);
        }
        Ok(())
    }

    /// Run `n` ticks at the configured pace, sleeping
    /// [`TickPace::interval_ms`] after each one, then emit `on_sim_end`.
    pub fn run_for<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        let interval = Duration::from_millis(self.pace.interval_ms());
        for _ in 0..n {
            self.tick_once(observer);
            thread::sleep(interval);
        }
        observer.on_sim_end(self.store.current().ticks);
        Ok(())
    }

    // ── Purchases ─────────────────────────────────────────────────────────

    /// Whether the current snapshot can afford one level of `upgrade`.
    pub fn can_buy(&self, upgrade: Upgrade) -> bool {
        self.engine.can_buy(self.store.current(), upgrade)
    }

    /// Buy one level of `upgrade` between ticks.  The replacement goes
    /// through the store, so subscribers see the purchase like any tick.
    pub fn buy(&mut self, upgrade: Upgrade) -> SimResult<Tick> {
        let next = self.engine.buy(self.store.current(), upgrade)?;
        self.store.replace(next);
        Ok(self.store.current().ticks)
    }
}
