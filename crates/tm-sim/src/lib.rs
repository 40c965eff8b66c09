//! `tm-sim` — game loop orchestration for tickmint.
//!
//! # One tick through the loop
//!
//! ```text
//! tick_once(observer):
//!   ① now  — sample the Clock exactly once.
//!   ② step — TickEngine::advance(current snapshot, now).
//!   ③ swap — StateStore::replace(next); subscribers notified.
//!   ④ hook — on_tick_end(tick, report); on_snapshot at intervals.
//! ```
//!
//! The loop is the single writer.  Purchases ([`GameLoop::buy`]) run between
//! ticks and replace the snapshot through the same store, so every state the
//! outside world observes is a complete, consistent snapshot.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tm_core::EngineConfig;
//! use tm_engine::TickEngine;
//! use tm_sim::{GameLoop, NoopObserver, SystemClock};
//!
//! let engine = TickEngine::new(EngineConfig::default())?;
//! let mut game = GameLoop::new(engine, SystemClock).with_snapshot_interval(100);
//! game.run_for(1_000, &mut NoopObserver)?;
//! ```

pub mod clock;
pub mod error;
pub mod observer;
pub mod runner;
pub mod store;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use runner::GameLoop;
pub use store::{StateStore, Subscriber};
