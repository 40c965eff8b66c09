//! Unit tests for tm-engine.

use rust_decimal::Decimal;

use tm_bignum::ScaledNumber;
use tm_core::{EngineConfig, Millis, Tick};

use crate::{EngineError, TickEngine, Upgrade, UpgradeLedger};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn engine() -> TickEngine {
    TickEngine::new(EngineConfig::default()).expect("default config validates")
}

fn engine_with(config: EngineConfig) -> TickEngine {
    TickEngine::new(config).expect("config validates")
}

/// Config with a whole-number production rate for deterministic queue tests.
fn rate_five() -> EngineConfig {
    EngineConfig {
        base_production_rate: Decimal::from(5),
        ..EngineConfig::default()
    }
}

// ── Derivations ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod derivations {
    use super::*;

    #[test]
    fn production_multiplier_is_identity_without_upgrades() {
        let ledger = UpgradeLedger::default();
        assert_eq!(ledger.production_multiplier(), Decimal::ONE);
    }

    #[test]
    fn production_multiplier_is_count_plus_one() {
        let ledger = UpgradeLedger { speed: 1, validation: 0 };
        assert_eq!(ledger.production_multiplier(), Decimal::from(2));
        let ledger = UpgradeLedger { speed: 4, validation: 0 };
        assert_eq!(ledger.production_multiplier(), Decimal::from(5));
    }

    #[test]
    fn latency_discount_compounds() {
        let e = engine();
        let base = UpgradeLedger::default();
        assert_eq!(e.effective_latency(&base), Decimal::from(4_000));

        let one = UpgradeLedger { speed: 0, validation: 1 };
        assert_eq!(e.effective_latency(&one), Decimal::from(3_960)); // 4000 × 0.99

        let two = UpgradeLedger { speed: 0, validation: 2 };
        assert_eq!(e.effective_latency(&two), Decimal::new(39_204, 1)); // 3920.4
    }

    #[test]
    fn latency_never_reaches_zero() {
        let e = engine();
        let many = UpgradeLedger { speed: 0, validation: 500 };
        let latency = e.effective_latency(&many);
        assert!(latency > Decimal::ZERO);
        assert!(latency < Decimal::from(4_000));
    }

    #[test]
    fn production_per_tick_combines_rate_and_multiplier() {
        let e = engine();
        let ledger = UpgradeLedger { speed: 2, validation: 0 };
        // 0.02 × 3.
        assert_eq!(e.production_per_tick(&ledger), Decimal::new(6, 2));
    }
}

// ── advance: production ───────────────────────────────────────────────────────

#[cfg(test)]
mod production {
    use super::*;

    #[test]
    fn whole_rate_fills_queue_immediately() {
        let e = engine_with(rate_five());
        let state = e.initial_state();
        let now = Millis(1_000);

        let (next, report) = e.advance(&state, now);
        assert_eq!(report.produced_entries, 5);
        assert_eq!(next.queue.len(), 5);
        assert_eq!(next.queue.oldest(), Some(now));
        assert_eq!(next.production_accumulator, Decimal::ZERO);
        assert_eq!(next.ticks, Tick(1));
        assert_eq!(next.pending, ScaledNumber::from(5u64));
    }

    #[test]
    fn fractional_rate_accumulates_until_a_whole_unit() {
        let e = engine(); // 0.02 per tick
        let mut state = e.initial_state();
        // 49 ticks: accumulator reaches 0.98, nothing queued yet.
        for i in 0..49 {
            let (next, report) = e.advance(&state, Millis(i * 100));
            assert_eq!(report.produced_entries, 0);
            state = next;
        }
        assert_eq!(state.production_accumulator, Decimal::new(98, 2));
        assert!(state.queue.is_empty());

        // Tick 50 crosses 1.0: one entry, accumulator back to 0.
        let (next, report) = e.advance(&state, Millis(4_900));
        assert_eq!(report.produced_entries, 1);
        assert_eq!(next.production_accumulator, Decimal::ZERO);
        assert_eq!(next.queue.len(), 1);
    }

    #[test]
    fn accumulator_always_within_unit_interval() {
        let config = EngineConfig {
            base_production_rate: Decimal::new(37, 2), // 0.37
            ..EngineConfig::default()
        };
        let e = engine_with(config);
        let mut state = e.initial_state();
        for i in 0..200 {
            let (next, _) = e.advance(&state, Millis(i * 100));
            assert!(next.production_accumulator >= Decimal::ZERO);
            assert!(next.production_accumulator < Decimal::ONE);
            state = next;
        }
    }

    #[test]
    fn speed_upgrades_scale_production() {
        let e = engine_with(rate_five());
        let state = e
            .initial_state()
            .with_upgrades(UpgradeLedger { speed: 1, validation: 0 });
        let (next, report) = e.advance(&state, Millis(0));
        // 5 × (1 + 1) = 10.
        assert_eq!(report.produced_entries, 10);
        assert_eq!(next.queue.len(), 10);
    }

    #[test]
    fn sub_slot_whole_units_are_dropped_at_higher_weight() {
        // With unit weight 2 and 1.5 accumulated, no slot fills and only the
        // fraction 0.5 carries — the whole unit goes with the integer part.
        let config = EngineConfig {
            base_production_rate: Decimal::new(15, 1), // 1.5
            initial_queue_threshold: 1,
            ..EngineConfig::default()
        };
        let e = engine_with(config);
        let mut state = e.initial_state();

        // Tick 1: 1.5 at weight 1 → one entry queued, 0.5 carried.
        let (next, _) = e.advance(&state, Millis(0));
        state = next;
        assert_eq!(state.queue.len(), 1);

        // Tick 2: queue reaches 2 > threshold 1 on the next breach check
        // after this push; run until a rescale fires.
        let (next, _) = e.advance(&state, Millis(100));
        state = next;
        let (next, report) = e.advance(&state, Millis(200));
        assert!(report.rescaled);
        assert_eq!(next.queue.unit_weight(), 2);
        // Post-rescale, 0.5 + 1.5 = 2.0 ≥ weight 2 → exactly one slot.
        let (after, report) = e.advance(&next, Millis(300));
        assert_eq!(report.produced_entries, 1);
        assert_eq!(after.production_accumulator, Decimal::ZERO);
    }
}

// ── advance: validation ───────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn entry_completes_only_after_latency() {
        let e = engine_with(rate_five());
        let t0 = Millis(0);
        let (with_pending, _) = e.advance(&e.initial_state(), t0);
        assert_eq!(with_pending.queue.len(), 5);

        // 3999 ms later: still pending.
        let (still, report) = e.advance(&with_pending, Millis(3_999));
        assert_eq!(report.completed_units, 0);
        assert_eq!(still.completed, ScaledNumber::zero());

        // 4001 ms after arrival: the batch completes at unit weight 1.  The
        // same tick produces 5 fresh entries stamped 4001, which is all the
        // queue holds afterwards.
        let (done, report) = e.advance(&with_pending, Millis(4_001));
        assert_eq!(report.completed_units, 5);
        assert_eq!(done.completed, ScaledNumber::from(5u64));
        assert_eq!(done.queue.len(), 5);
        assert_eq!(done.queue.oldest(), Some(Millis(4_001)));
        assert_eq!(done.pending, ScaledNumber::from(5u64));
    }

    #[test]
    fn completion_credits_funds_through_fee() {
        let e = engine_with(rate_five());
        let (pending, _) = e.advance(&e.initial_state(), Millis(0));
        let (done, report) = e.advance(&pending, Millis(4_001));
        // 5 units × 10 currency × 0.02 fee = 1.
        assert_eq!(report.funds_delta, ScaledNumber::from(1u64));
        assert_eq!(done.funds, ScaledNumber::from(1u64));
    }

    #[test]
    fn no_completions_no_funds() {
        let e = engine();
        let (next, report) = e.advance(&e.initial_state(), Millis(0));
        assert!(report.funds_delta.is_zero());
        assert!(next.funds.is_zero());
    }

    #[test]
    fn validation_upgrade_shortens_the_wait() {
        // 100 validation levels: latency 4000 × 0.99^100 ≈ 1464 ms.
        let e = engine_with(rate_five());
        let state = e
            .initial_state()
            .with_upgrades(UpgradeLedger { speed: 0, validation: 100 });
        let (pending, _) = e.advance(&state, Millis(0));
        let (done, report) = e.advance(&pending, Millis(1_500));
        assert_eq!(report.completed_units, 5);
        // Only this tick's fresh production remains.
        assert_eq!(done.queue.oldest(), Some(Millis(1_500)));
    }
}

// ── advance: rescaling ────────────────────────────────────────────────────────

#[cfg(test)]
mod rescaling {
    use super::*;

    /// Breach tick clears the queue and doubles the weight by the next tick.
    #[test]
    fn breach_resolves_within_one_tick() {
        let config = EngineConfig {
            base_production_rate: Decimal::from(6),
            initial_queue_threshold: 10,
            // Long latency so nothing completes during the test window.
            base_validation_latency_ms: Decimal::from(1_000_000),
            ..EngineConfig::default()
        };
        let e = engine_with(config);
        let mut state = e.initial_state();

        // Tick 1: 6 entries (≤ 10). Tick 2: 12 entries > 10 — the breach
        // becomes visible to the capacity policy on tick 3.
        let mut breach_seen = false;
        for i in 0..3 {
            let len_before = state.queue.len() as u64;
            let (next, report) = e.advance(&state, Millis(i * 100));
            if report.rescaled {
                breach_seen = true;
                assert!(len_before > state.queue.threshold());
                // The queue was cleared; only this tick's production remains.
                assert_eq!(next.queue.len() as u64, report.produced_entries);
                assert_eq!(next.queue.unit_weight(), 2);
                assert_eq!(next.queue.threshold(), 11);
            }
            state = next;
        }
        assert!(breach_seen);
    }

    #[test]
    fn carried_slots_eventually_complete() {
        let config = EngineConfig {
            base_production_rate: Decimal::from(6),
            initial_queue_threshold: 10,
            base_validation_latency_ms: Decimal::from(1_000_000),
            ..EngineConfig::default()
        };
        let e = engine_with(config);
        let mut state = e.initial_state();
        let mut carried = 0;
        for i in 0..3 {
            let (next, report) = e.advance(&state, Millis(i * 100));
            if report.rescaled {
                carried = next.queue.carry_units();
            }
            state = next;
        }
        assert!(carried > 0);

        // The tick after the rescale drains the carry at weight 1.
        let (next, report) = e.advance(&state, Millis(400));
        assert_eq!(report.completed_units, carried);
        assert_eq!(next.queue.carry_units(), 0);
    }
}

// ── Purchases ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod purchases {
    use super::*;

    #[test]
    fn purchase_rejected_one_short() {
        let e = engine();
        let state = e.initial_state().with_funds(ScaledNumber::from(39u64));
        assert!(!e.can_buy(&state, Upgrade::Speed));

        let err = e.buy(&state, Upgrade::Speed).unwrap_err();
        match err {
            EngineError::InsufficientFunds { upgrade, cost } => {
                assert_eq!(upgrade, Upgrade::Speed);
                assert_eq!(cost, 40);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Rejection leaves the snapshot the caller holds untouched.
        assert_eq!(state.funds, ScaledNumber::from(39u64));
        assert_eq!(state.upgrades.speed, 0);
    }

    #[test]
    fn purchase_at_exact_cost_succeeds() {
        let e = engine();
        let state = e.initial_state().with_funds(ScaledNumber::from(40u64));
        assert!(e.can_buy(&state, Upgrade::Speed));

        let next = e.buy(&state, Upgrade::Speed).expect("affordable");
        assert!(next.funds.is_zero());
        assert_eq!(next.upgrades.speed, 1);
        assert_eq!(next.upgrades.validation, 0);
    }

    #[test]
    fn validation_upgrade_costs_more() {
        let e = engine();
        let broke = e.initial_state().with_funds(ScaledNumber::from(119u64));
        assert!(!e.can_buy(&broke, Upgrade::Validation));

        let funded = e.initial_state().with_funds(ScaledNumber::from(120u64));
        let next = e.buy(&funded, Upgrade::Validation).expect("affordable");
        assert!(next.funds.is_zero());
        assert_eq!(next.upgrades.validation, 1);
    }

    #[test]
    fn purchases_compound() {
        let e = engine();
        let state = e.initial_state().with_funds(ScaledNumber::from(200u64));
        let state = e.buy(&state, Upgrade::Speed).expect("first");
        let state = e.buy(&state, Upgrade::Speed).expect("second");
        assert_eq!(state.upgrades.speed, 2);
        assert_eq!(state.funds, ScaledNumber::from(120u64));
        // 120 left covers exactly one validation level.
        let state = e.buy(&state, Upgrade::Validation).expect("third");
        assert!(state.funds.is_zero());
    }
}

// ── Purity ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod purity {
    use super::*;

    #[test]
    fn advance_is_deterministic() {
        let e = engine_with(rate_five());
        let state = e.initial_state();
        let (a, _) = e.advance(&state, Millis(123));
        let (b, _) = e.advance(&state, Millis(123));
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.production_accumulator, b.production_accumulator);
        assert_eq!(a.funds, b.funds);
        assert_eq!(a.queue.len(), b.queue.len());
    }

    #[test]
    fn advance_leaves_input_untouched() {
        let e = engine_with(rate_five());
        let state = e.initial_state();
        let ticks_before = state.ticks;
        let _ = e.advance(&state, Millis(0));
        assert_eq!(state.ticks, ticks_before);
        assert!(state.queue.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let bad = EngineConfig {
            initial_queue_threshold: 0,
            ..EngineConfig::default()
        };
        assert!(TickEngine::new(bad).is_err());
    }
}
