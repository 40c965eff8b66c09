//! The full simulation state snapshot.

use rust_decimal::Decimal;

use tm_bignum::ScaledNumber;
use tm_core::{EngineConfig, Tick};
use tm_queue::ValidationQueue;

use crate::UpgradeLedger;

/// Everything the simulation knows, as one owned value.
///
/// The engine never mutates a snapshot in place: `advance` and `buy` consume
/// a reference and return a replacement.  Whoever owns the current snapshot
/// (the runner's state store, a local in tests) swaps it wholesale, so
/// no consumer can observe a half-applied tick or purchase.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationState {
    /// Count of elapsed ticks.
    pub ticks: Tick,

    /// Fractional production carried between ticks, always in `[0, 1)`.
    /// Never lost, never negative.
    pub production_accumulator: Decimal,

    /// Pending transactions and the queue's rescale bookkeeping.
    pub queue: ValidationQueue,

    /// Total completed transaction units, ever.
    pub completed: ScaledNumber,

    /// Queue slots currently pending (refreshed every tick).
    pub pending: ScaledNumber,

    /// Spendable currency.
    pub funds: ScaledNumber,

    /// Purchased upgrade counters.
    pub upgrades: UpgradeLedger,
}

impl SimulationState {
    /// A fresh game: nothing produced, nothing completed, empty queue at the
    /// configured initial threshold.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            ticks:                  Tick::ZERO,
            production_accumulator: Decimal::ZERO,
            queue:                  ValidationQueue::new(config.initial_queue_threshold),
            completed:              ScaledNumber::zero(),
            pending:                ScaledNumber::zero(),
            funds:                  ScaledNumber::zero(),
            upgrades:               UpgradeLedger::default(),
        }
    }

    // ── Debug/test conveniences ───────────────────────────────────────────
    //
    // The debug layer sets funds and upgrade counts directly; these builders
    // keep that a one-liner without exposing setters the engine itself
    // never calls.

    pub fn with_funds(mut self, funds: ScaledNumber) -> Self {
        self.funds = funds;
        self
    }

    pub fn with_upgrades(mut self, upgrades: UpgradeLedger) -> Self {
        self.upgrades = upgrades;
        self
    }
}
