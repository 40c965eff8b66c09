//! `TelemetryObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tm_core::{Millis, Tick, TickPace};
use tm_engine::{SimulationState, TickReport};
use tm_sim::SimObserver;

use crate::row::TickSummaryRow;
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes one [`TickSummaryRow`] per snapshot to any
/// [`OutputWriter`] backend.
///
/// Run the loop with a snapshot interval of 1 for a row on every tick.  The
/// per-tick counters come from the `on_tick_end` report; the settled queue
/// and funds columns come from the snapshot that follows it.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TelemetryObserver<W: OutputWriter> {
    writer:        W,
    start_unix_ms: i64,
    interval_ms:   i64,
    /// Report buffered between `on_tick_end` and the matching `on_snapshot`.
    pending:       Option<(Tick, TickReport)>,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> TelemetryObserver<W> {
    /// Create an observer backed by `writer`.  `start` and `pace` anchor the
    /// wall-clock column: tick `n` maps to `start + n × pace.interval_ms()`.
    pub fn new(writer: W, start: Millis, pace: TickPace) -> Self {
        Self {
            writer,
            start_unix_ms: start.0,
            interval_ms:   pace.interval_ms() as i64,
            pending:       None,
            last_error:    None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_ms(&self, tick: Tick) -> i64 {
        self.start_unix_ms + tick.0 as i64 * self.interval_ms
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TelemetryObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        self.pending = Some((tick, report.clone()));
    }

    fn on_snapshot(&mut self, tick: Tick, state: &SimulationState) {
        // Snapshot ticks are numbered after the advance; the buffered report
        // carries the pre-advance number of the same tick.
        let report = match self.pending.take() {
            Some((at, report)) if tick == at + 1 => Some(report),
            _ => None,
        };
        let (completed_units, produced_entries, rescaled) = match &report {
            Some(r) => (r.completed_units, r.produced_entries, r.rescaled),
            None    => (0, 0, false),
        };

        let row = TickSummaryRow {
            tick: tick.0,
            unix_ms: self.unix_ms(tick),
            completed_units,
            produced_entries,
            queue_len: state.queue.len() as u64,
            unit_weight: state.queue.unit_weight(),
            rescaled,
            funds: state.funds.to_scientific(),
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
