//! `tm-queue` — the validation queue for the tickmint engine.
//!
//! # Why this exists
//!
//! Produced transactions do not pay out immediately: each one waits in an
//! ordered queue until its age exceeds the effective validation latency.
//! Left alone, a growing economy would make that queue arbitrarily long and
//! every tick's prefix scan arbitrarily slow.  [`ValidationQueue`] bounds
//! both with an adaptive weight: once the queue backs up past a threshold,
//! each slot is reinterpreted as representing twice as many underlying
//! economic units and the queue compacts, trading length resolution for
//! bounded memory and iteration cost — the same shape of trade a hash table
//! makes when it resizes.

pub mod queue;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use queue::ValidationQueue;
