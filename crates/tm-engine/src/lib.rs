//! `tm-engine` — the tick-driven economic simulation engine.
//!
//! # One tick
//!
//! ```text
//! advance(state, now):
//!   ① Latency    — effective = base × discount^validation_upgrades.
//!   ② Complete   — drain the rescale carry, then pop the queue prefix
//!                  whose age exceeds the effective latency.
//!   ③ Rescale    — if the queue breached its threshold: double the unit
//!                  weight, fold the queue into the carry, grow the
//!                  threshold ×1.1.
//!   ④ Produce    — accumulator + rate × multiplier; push
//!                  floor(total / weight) entries stamped `now`; keep the
//!                  fractional part.
//!   ⑤ Settle     — funds += unit_value × fee × completed units; update
//!                  the completed/pending counters; ticks += 1.
//! ```
//!
//! `advance` is a pure function from one [`SimulationState`] snapshot to the
//! next: no hidden I/O, no interior mutability, a single `now` for every age
//! comparison.  Purchases are separate synchronous transitions on the same
//! snapshot type, so a caller that serializes `advance` and `buy` gets the
//! single-writer discipline for free.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod engine;
pub mod error;
pub mod state;
pub mod upgrades;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use engine::{TickEngine, TickReport};
pub use error::{EngineError, EngineResult};
pub use state::SimulationState;
pub use upgrades::{Upgrade, UpgradeLedger};
