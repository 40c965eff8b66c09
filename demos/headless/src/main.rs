//! headless — batch tickmint run with telemetry and an auto-buyer.
//!
//! Fast-forwards a few thousand fast-pace ticks on a manual clock (each tick
//! advances simulated time by the pace interval), buying upgrades whenever the
//! balance allows, then finishes with a short real-time stretch so the paced
//! loop gets exercised too.  Telemetry lands in `output/headless/`.

use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tm_core::{EngineConfig, Millis, TickPace};
use tm_engine::{TickEngine, Upgrade};
use tm_output::{CsvWriter, TelemetryObserver};
use tm_sim::{GameLoop, ManualClock};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64      = 42;
const PACE:           TickPace = TickPace::Fast;
const BATCH_TICKS:    u64      = 5_000;
const REALTIME_TICKS: u64      = 20;
const PROGRESS_EVERY: u64      = 500;
const FLAVOR_EVERY:   u64      = 777; // occasional transaction log line
const OUTPUT_DIR:     &str     = "output/headless";

// ── Transaction flavor ────────────────────────────────────────────────────────

const FIRST_NAMES: [&str; 8] = [
    "Ada", "Bram", "Celia", "Dmitri", "Esin", "Farid", "Greta", "Hugo",
];
const SURNAMES: [&str; 8] = [
    "Okafor", "Lindqvist", "Marchetti", "Ishikawa", "Novak", "Reyes", "Sow", "Tanaka",
];
const TRANSACTION_TYPES: [&str; 4] = ["SEND", "REQUEST", "FULFILL", "LOAN"];

/// One decorative ledger line: the economic engine only counts units, so the
/// parties and amounts shown here are cosmetic.
fn flavor_line(rng: &mut StdRng) -> String {
    let sender = (
        FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
        SURNAMES[rng.gen_range(0..SURNAMES.len())],
    );
    let receiver = (
        FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
        SURNAMES[rng.gen_range(0..SURNAMES.len())],
    );
    let kind = TRANSACTION_TYPES[rng.gen_range(0..TRANSACTION_TYPES.len())];
    let amount: f64 = rng.gen_range(0.5..500.0);
    let id: u32 = rng.gen_range(100_000..999_999);
    format!(
        "  tx#{id} {kind} {amount:.2} TMC  {} {} -> {} {}",
        sender.0, sender.1, receiver.0, receiver.1
    )
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== headless — tickmint economic simulation ===");
    println!("Ticks: {BATCH_TICKS} batch + {REALTIME_TICKS} realtime  |  Pace: {:?}  |  Seed: {SEED}", PACE);
    println!();

    // 1. Engine with the shipped balance.
    let config = EngineConfig::default();
    let engine = TickEngine::new(config)?;

    // 2. Manual clock anchored at the real wall clock; one pace interval of
    //    simulated time per tick.
    let start_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    let clock = ManualClock::new(Millis(start_ms), PACE.interval_ms() as i64);

    let mut game = GameLoop::new(engine, clock)
        .with_pace(PACE)
        .with_snapshot_interval(1);

    // 3. Telemetry sink.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = TelemetryObserver::new(writer, Millis(start_ms), PACE);

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut purchases = 0u64;

    // 4. Batch phase: tick as fast as the host allows, auto-buying between
    //    ticks.  Validation upgrades first (they compound), speed second.
    println!("{:>6}  {:>9}  {:>6}  {:>5}  {:>5}  {}", "tick", "queue", "weight", "spd", "val", "funds");
    let t0 = Instant::now();
    for n in 1..=BATCH_TICKS {
        game.tick_once(&mut obs);

        if game.can_buy(Upgrade::Validation) {
            game.buy(Upgrade::Validation)?;
            purchases += 1;
        } else if game.can_buy(Upgrade::Speed) {
            game.buy(Upgrade::Speed)?;
            purchases += 1;
        }

        if n.is_multiple_of(PROGRESS_EVERY) {
            let s = game.store().current();
            println!(
                "{:>6}  {:>9}  {:>6}  {:>5}  {:>5}  {}",
                s.ticks,
                s.queue.len(),
                s.queue.unit_weight(),
                s.upgrades.speed,
                s.upgrades.validation,
                s.funds.to_named(),
            );
        }
        if n.is_multiple_of(FLAVOR_EVERY) {
            println!("{}", flavor_line(&mut rng));
        }
    }
    let batch_elapsed = t0.elapsed();

    // 5. Realtime tail: paced ticks, ending with on_sim_end (flushes the CSV).
    game.run_for(REALTIME_TICKS, &mut obs)?;

    if let Some(e) = obs.take_error() {
        eprintln!("telemetry error: {e}");
    }

    // 6. Summary.
    let state = game.store().snapshot();
    println!();
    println!("Batch phase: {:.3} s for {BATCH_TICKS} ticks", batch_elapsed.as_secs_f64());
    println!("Upgrades bought: {purchases} (speed {}, validation {})", state.upgrades.speed, state.upgrades.validation);
    println!("Units completed: {}", state.completed.to_named());
    println!("Final funds:");
    println!("  standard    : {}", state.funds.to_named());
    println!("  scientific  : {}", state.funds.to_scientific());
    println!("  engineering : {}", state.funds.to_engineering());
    println!();
    println!("Telemetry: {OUTPUT_DIR}/tick_summaries.csv");
    Ok(())
}
