//! Unit tests for tm-sim.

use std::cell::RefCell;
use std::rc::Rc;

use rust_decimal::Decimal;

use tm_bignum::ScaledNumber;
use tm_core::{EngineConfig, Millis, Tick};
use tm_engine::{SimulationState, TickEngine, TickReport, Upgrade};

use crate::{Clock, GameLoop, ManualClock, NoopObserver, SimError, SimObserver, StateStore};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn engine() -> TickEngine {
    TickEngine::new(EngineConfig::default()).expect("default config validates")
}

fn engine_rate_five() -> TickEngine {
    let config = EngineConfig {
        base_production_rate: Decimal::from(5),
        ..EngineConfig::default()
    };
    TickEngine::new(config).expect("config validates")
}

/// Records every observer callback for assertion.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    ends:      Vec<(Tick, u64)>,
    snapshots: Vec<Tick>,
    ended_at:  Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        self.ends.push((tick, report.produced_entries));
    }
    fn on_snapshot(&mut self, tick: Tick, _state: &SimulationState) {
        self.snapshots.push(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

// ── Clocks ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clocks {
    use super::*;

    #[test]
    fn manual_clock_steps_per_reading() {
        let mut clock = ManualClock::new(Millis(1_000), 100);
        assert_eq!(clock.now(), Millis(1_000));
        assert_eq!(clock.now(), Millis(1_100));
        assert_eq!(clock.now(), Millis(1_200));
    }

    #[test]
    fn fixed_clock_never_advances() {
        let mut clock = ManualClock::fixed(Millis(42));
        assert_eq!(clock.now(), Millis(42));
        assert_eq!(clock.now(), Millis(42));
    }

    #[test]
    fn set_jumps_without_a_reading() {
        let mut clock = ManualClock::new(Millis(0), 100);
        clock.set(Millis(5_000));
        assert_eq!(clock.peek(), Millis(5_000));
        assert_eq!(clock.now(), Millis(5_000));
        assert_eq!(clock.now(), Millis(5_100));
    }
}

// ── StateStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn subscribers_observe_every_replacement() {
        let e = engine();
        let mut store = StateStore::new(e.initial_state());

        let seen: Rc<RefCell<Vec<Tick>>> = Rc::default();
        let sink = Rc::clone(&seen);
        store.subscribe(Box::new(move |state| sink.borrow_mut().push(state.ticks)));
        assert_eq!(store.subscriber_count(), 1);

        let (next, _) = e.advance(store.current(), Millis(0));
        store.replace(next);
        let (next, _) = e.advance(store.current(), Millis(100));
        store.replace(next);

        assert_eq!(*seen.borrow(), vec![Tick(1), Tick(2)]);
    }

    #[test]
    fn update_replaces_and_notifies() {
        let e = engine();
        let mut store = StateStore::new(e.initial_state());

        let notified = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&notified);
        store.subscribe(Box::new(move |_| *sink.borrow_mut() += 1));

        store.update(|state| state.clone().with_funds(ScaledNumber::from(7u64)));
        assert_eq!(store.current().funds, ScaledNumber::from(7u64));
        assert_eq!(*notified.borrow(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_replacements() {
        let e = engine();
        let mut store = StateStore::new(e.initial_state());
        let before = store.snapshot();

        let (next, _) = e.advance(store.current(), Millis(0));
        store.replace(next);

        assert_eq!(before.ticks, Tick::ZERO);
        assert_eq!(store.current().ticks, Tick(1));
    }
}

// ── GameLoop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod game_loop {
    use super::*;

    #[test]
    fn run_ticks_advances_state_through_the_store() {
        let clock = ManualClock::new(Millis(0), 100);
        let mut game = GameLoop::new(engine_rate_five(), clock);

        game.run_ticks(3, &mut NoopObserver).expect("run");
        let state = game.store().snapshot();
        assert_eq!(state.ticks, Tick(3));
        assert_eq!(state.queue.len(), 15);
        // Entries carry the per-tick clock samples.
        assert_eq!(state.queue.oldest(), Some(Millis(0)));
    }

    #[test]
    fn observer_sees_each_tick_boundary() {
        let clock = ManualClock::new(Millis(0), 100);
        let mut game = GameLoop::new(engine_rate_five(), clock);
        let mut recorder = Recorder::default();

        game.run_ticks(3, &mut recorder).expect("run");
        assert_eq!(recorder.starts, vec![Tick(0), Tick(1), Tick(2)]);
        assert_eq!(
            recorder.ends,
            vec![(Tick(0), 5), (Tick(1), 5), (Tick(2), 5)]
        );
        assert_eq!(recorder.ended_at, None); // run_ticks never ends the sim
    }

    #[test]
    fn snapshots_fire_at_the_configured_interval() {
        let clock = ManualClock::new(Millis(0), 100);
        let mut game = GameLoop::new(engine(), clock).with_snapshot_interval(2);
        let mut recorder = Recorder::default();

        game.run_ticks(5, &mut recorder).expect("run");
        assert_eq!(recorder.snapshots, vec![Tick(2), Tick(4)]);
    }

    #[test]
    fn completed_units_flow_through_a_paced_run() {
        // Step the manual clock past the 4000 ms latency so the first batch
        // completes mid-run.
        let clock = ManualClock::new(Millis(0), 1_000);
        let mut game = GameLoop::new(engine_rate_five(), clock);

        game.run_ticks(6, &mut NoopObserver).expect("run");
        let state = game.store().snapshot();
        // Batch from t=0 completes at t=5000 (age 5000 > 4000).
        assert!(state.completed >= ScaledNumber::from(5u64));
        assert!(!state.funds.is_zero());
    }

    #[test]
    fn purchase_between_ticks_goes_through_the_store() {
        let clock = ManualClock::fixed(Millis(0));
        let mut game = GameLoop::new(engine(), clock);

        let seen = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&seen);
        game.store_mut()
            .subscribe(Box::new(move |_| *sink.borrow_mut() += 1));

        game.store_mut()
            .update(|state| state.clone().with_funds(ScaledNumber::from(40u64)));
        assert!(game.can_buy(Upgrade::Speed));
        game.buy(Upgrade::Speed).expect("affordable");

        let state = game.store().snapshot();
        assert!(state.funds.is_zero());
        assert_eq!(state.upgrades.speed, 1);
        // One notification for the funds update, one for the purchase.
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn rejected_purchase_surfaces_the_engine_error() {
        let clock = ManualClock::fixed(Millis(0));
        let mut game = GameLoop::new(engine(), clock);

        assert!(!game.can_buy(Upgrade::Validation));
        let err = game.buy(Upgrade::Validation).unwrap_err();
        assert!(matches!(err, SimError::Engine(_)));
        assert!(game.store().current().funds.is_zero());
    }

    #[test]
    fn identical_clocks_give_identical_runs() {
        let mut a = GameLoop::new(engine_rate_five(), ManualClock::new(Millis(0), 100));
        let mut b = GameLoop::new(engine_rate_five(), ManualClock::new(Millis(0), 100));
        a.run_ticks(50, &mut NoopObserver).expect("run a");
        b.run_ticks(50, &mut NoopObserver).expect("run b");

        let sa = a.store().snapshot();
        let sb = b.store().snapshot();
        assert_eq!(sa.ticks, sb.ticks);
        assert_eq!(sa.funds, sb.funds);
        assert_eq!(sa.queue.len(), sb.queue.len());
        assert_eq!(sa.production_accumulator, sb.production_accumulator);
    }
}
