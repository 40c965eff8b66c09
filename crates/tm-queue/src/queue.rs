//! `ValidationQueue` — ordered pending transactions with weight rescaling.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use tm_core::Millis;

/// An ordered collection of pending transaction arrival timestamps plus the
/// per-slot unit weight and rescale bookkeeping.
///
/// # Ordering invariant
///
/// Entries are only ever appended at the tail (stamped with the current
/// tick's "now") and removed from the head, so the deque is always sorted by
/// arrival time and the completion scan can stop at the first still-pending
/// entry.  Head removal on a `VecDeque` is O(1) — no element shifting, which
/// is exactly the index-range refinement the prefix-filter approach wants.
///
/// # Lifecycle per tick (driven by the engine, in this order)
///
/// 1. [`drain_carry`][Self::drain_carry] — convert rescale carry-over into
///    completed units.
/// 2. [`drain_completed`][Self::drain_completed] — pop the aged prefix.
/// 3. [`rescale_if_over_threshold`][Self::rescale_if_over_threshold].
/// 4. [`push_produced`][Self::push_produced] — append this tick's output.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationQueue {
    /// Arrival timestamps, oldest at the front.
    entries: VecDeque<Millis>,

    /// Economic units one queue slot represents.  Doubles at every rescale;
    /// never below 1.
    unit_weight: u64,

    /// Queue length that triggers the next rescale.  Grows ×1.1 (rounded)
    /// each time it is crossed.
    threshold: u64,

    /// Units carried over from rescale compaction, pending conversion into
    /// completions.  The fractional analogue of the production accumulator,
    /// but for queue-unit granularity.
    carry_units: u64,
}

impl ValidationQueue {
    /// An empty queue with unit weight 1 and the given initial threshold.
    pub fn new(initial_threshold: u64) -> Self {
        Self {
            entries:     VecDeque::new(),
            unit_weight: 1,
            threshold:   initial_threshold,
            carry_units: 0,
        }
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// Number of pending slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn unit_weight(&self) -> u64 {
        self.unit_weight
    }

    #[inline]
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    #[inline]
    pub fn carry_units(&self) -> u64 {
        self.carry_units
    }

    /// Arrival time of the oldest pending entry, if any.
    #[inline]
    pub fn oldest(&self) -> Option<Millis> {
        self.entries.front().copied()
    }

    // ── Per-tick operations ───────────────────────────────────────────────

    /// Convert rescale carry-over into completed units.
    ///
    /// Carried units completed at the weight they were queued under — the
    /// pre-rescale slot weight `max(unit_weight / 2, 1)`.  Whole multiples
    /// complete; the remainder stays in the accumulator for a later tick
    /// rather than being discarded.
    pub fn drain_carry(&mut self) -> u64 {
        if self.carry_units == 0 {
            return 0;
        }
        let carry_weight = (self.unit_weight / 2).max(1);
        let completed = self.carry_units / carry_weight;
        self.carry_units %= carry_weight;
        completed
    }

    /// Pop every entry whose age exceeds `effective_latency` and return the
    /// completed units (`unit_weight` per popped slot).
    ///
    /// Scans from the oldest entry and stops at the first one still pending;
    /// the ordering invariant guarantees nothing behind it is expired.  An
    /// empty queue completes nothing.
    pub fn drain_completed(&mut self, now: Millis, effective_latency: Decimal) -> u64 {
        let now = now.as_decimal();
        let mut completed: u64 = 0;
        while let Some(arrival) = self.entries.front() {
            if arrival.as_decimal() + effective_latency < now {
                self.entries.pop_front();
                completed = completed.saturating_add(self.unit_weight);
            } else {
                break;
            }
        }
        completed
    }

    /// Apply the capacity policy: when the queue length exceeds the
    /// threshold, double the unit weight, fold the in-flight slots into the
    /// carry accumulator (`round(carry / 2) + old_len`), clear the queue,
    /// and grow the threshold ×1.1 (rounded).
    ///
    /// Returns whether a rescale happened.  The compaction is deliberately
    /// lossy about per-entry ages; the carried slots complete via
    /// [`drain_carry`][Self::drain_carry] instead.
    pub fn rescale_if_over_threshold(&mut self) -> bool {
        let len = self.entries.len() as u64;
        if len <= self.threshold {
            return false;
        }
        // Round half up.
        self.carry_units = (self.carry_units.saturating_add(1) / 2).saturating_add(len);
        self.entries.clear();
        self.unit_weight = self.unit_weight.saturating_mul(2);
        self.threshold = self
            .threshold
            .saturating_mul(11)
            .saturating_add(5)
            / 10;
        true
    }

    /// Append `count` freshly produced entries, all stamped `now`.
    pub fn push_produced(&mut self, count: u64, now: Millis) {
        self.entries.reserve(count as usize);
        for _ in 0..count {
            self.entries.push_back(now);
        }
    }
}
