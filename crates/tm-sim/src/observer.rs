//! Game-loop observer trait for progress reporting and telemetry.

use tm_core::Tick;
use tm_engine::{SimulationState, TickReport};

/// Callbacks invoked by [`GameLoop`][crate::GameLoop] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: +{} units", report.completed_units);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the engine advances.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with what the tick did.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called at snapshot intervals (every `snapshot_interval` ticks).
    ///
    /// Provides read-only access to the full state so output writers can
    /// record a snapshot without the loop knowing any specific format.
    fn on_snapshot(&mut self, _tick: Tick, _state: &SimulationState) {}

    /// Called once after the final tick of a run completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run_ticks`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
