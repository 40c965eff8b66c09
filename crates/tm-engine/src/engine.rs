//! `TickEngine` — the advance function and purchase transitions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use tm_bignum::ScaledNumber;
use tm_core::{EngineConfig, Millis};

use crate::{EngineError, EngineResult, SimulationState, Upgrade, UpgradeLedger};

// ── TickReport ────────────────────────────────────────────────────────────────

/// What one tick did, for observers and telemetry.
#[derive(Clone, Debug)]
pub struct TickReport {
    /// Economic units completed this tick (queue prefix + rescale carry).
    pub completed_units: u64,
    /// Queue entries appended this tick.
    pub produced_entries: u64,
    /// Whether the capacity policy rescaled the queue this tick.
    pub rescaled: bool,
    /// Currency credited this tick.
    pub funds_delta: ScaledNumber,
}

// ── TickEngine ────────────────────────────────────────────────────────────────

/// The orchestrator: holds the (validated) configuration and derives each
/// state snapshot from the previous one.
///
/// All operations are total over their documented domains — the only
/// caller-visible failure is a disallowed purchase.
pub struct TickEngine {
    config: EngineConfig,
}

impl TickEngine {
    /// Validate `config` and build an engine around it.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A fresh starting snapshot for this engine's configuration.
    pub fn initial_state(&self) -> SimulationState {
        SimulationState::new(&self.config)
    }

    // ── Derivations ───────────────────────────────────────────────────────

    /// Validation latency in milliseconds after the upgrade discount.
    pub fn effective_latency(&self, ledger: &UpgradeLedger) -> Decimal {
        self.config.base_validation_latency_ms
            * ledger.latency_factor(self.config.latency_discount)
    }

    /// Transactions produced per tick after the speed multiplier.
    pub fn production_per_tick(&self, ledger: &UpgradeLedger) -> Decimal {
        self.config.base_production_rate * ledger.production_multiplier()
    }

    // ── advance ───────────────────────────────────────────────────────────

    /// Advance the simulation by exactly one tick.
    ///
    /// `now` is the single wall-clock sample for this tick; every age
    /// comparison and every entry stamped this tick uses it.  The input
    /// snapshot is untouched — the caller replaces its state with the
    /// returned one.
    pub fn advance(&self, state: &SimulationState, now: Millis) -> (SimulationState, TickReport) {
        let mut queue = state.queue.clone();

        // ① + ② Complete the rescale carry and the expired queue prefix.
        let latency = self.effective_latency(&state.upgrades);
        let mut completed_units = queue.drain_carry();
        completed_units = completed_units.saturating_add(queue.drain_completed(now, latency));

        // ③ Capacity policy.  Runs before production so this tick's output
        // is discretized at the post-rescale weight.
        let rescaled = queue.rescale_if_over_threshold();

        // ④ Production: accumulate, discretize into whole slots, keep the
        // fractional part.  Whole units short of a full slot at weight > 1
        // are dropped with the integer part — a known resolution cost of
        // the weighting scheme.
        let total = state.production_accumulator + self.production_per_tick(&state.upgrades);
        let weight = Decimal::from(queue.unit_weight());
        let produced_entries = if total >= weight {
            (total / weight).floor().to_u64().unwrap_or(0)
        } else {
            0
        };
        if produced_entries > 0 {
            queue.push_produced(produced_entries, now);
        }
        let production_accumulator = total.fract();

        // ⑤ Settle funds and counters.
        let funds_delta = if completed_units > 0 {
            ScaledNumber::from(self.config.unit_value)
                .multiply(&ScaledNumber::from(self.config.transfer_fee_rate))
                .multiply(&ScaledNumber::from(completed_units))
        } else {
            ScaledNumber::zero()
        };

        let next = SimulationState {
            ticks: state.ticks + 1,
            production_accumulator,
            completed: state.completed.add(&ScaledNumber::from(completed_units)),
            pending: ScaledNumber::from(queue.len() as u64),
            funds: state.funds.add(&funds_delta),
            queue,
            upgrades: state.upgrades,
        };

        let report = TickReport {
            completed_units,
            produced_entries,
            rescaled,
            funds_delta,
        };
        (next, report)
    }

    // ── Purchases ─────────────────────────────────────────────────────────

    /// Whether `state` can afford one level of `upgrade`.  UIs use this to
    /// disable the purchase affordance rather than surfacing the error.
    pub fn can_buy(&self, state: &SimulationState, upgrade: Upgrade) -> bool {
        state.funds >= ScaledNumber::from(upgrade.cost(&self.config))
    }

    /// Debit the cost and record the level, or reject the purchase leaving
    /// the state untouched.
    pub fn buy(
        &self,
        state: &SimulationState,
        upgrade: Upgrade,
    ) -> EngineResult<SimulationState> {
        let cost = upgrade.cost(&self.config);
        let price = ScaledNumber::from(cost);
        if state.funds < price {
            return Err(EngineError::InsufficientFunds { upgrade, cost });
        }
        let mut next = state.clone();
        next.funds = state.funds.subtract(&price);
        next.upgrades.record(upgrade);
        Ok(next)
    }
}
