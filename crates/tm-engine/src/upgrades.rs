//! Purchasable upgrades and their rate/latency derivations.

use std::fmt;

use rust_decimal::Decimal;

use tm_core::EngineConfig;

// ── Upgrade kinds ─────────────────────────────────────────────────────────────

/// The two purchasable upgrade kinds.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Upgrade {
    /// Linearly scales production: `n` levels multiply the base rate by
    /// `n + 1`.
    Speed,
    /// Multiplicatively discounts validation latency by the configured
    /// factor per level.
    Validation,
}

impl Upgrade {
    /// Currency cost of one level of this upgrade.
    pub fn cost(self, config: &EngineConfig) -> u64 {
        match self {
            Upgrade::Speed => config.speed_upgrade_cost,
            Upgrade::Validation => config.validation_upgrade_cost,
        }
    }
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upgrade::Speed => write!(f, "transaction-speed"),
            Upgrade::Validation => write!(f, "validation-speed"),
        }
    }
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Purchase counters plus the pure derivations the engine reads each tick.
///
/// The derivations take their inputs explicitly instead of being computed
/// properties of some shared store, so a tick reads one consistent ledger
/// and tests can probe the formulas directly.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeLedger {
    /// Transaction-speed levels purchased.
    pub speed: u32,
    /// Validation-speed levels purchased.
    pub validation: u32,
}

impl UpgradeLedger {
    pub fn count(&self, kind: Upgrade) -> u32 {
        match kind {
            Upgrade::Speed => self.speed,
            Upgrade::Validation => self.validation,
        }
    }

    /// Record one purchased level.
    pub fn record(&mut self, kind: Upgrade) {
        match kind {
            Upgrade::Speed => self.speed += 1,
            Upgrade::Validation => self.validation += 1,
        }
    }

    /// Production-rate multiplier: `n + 1` once any speed level is owned,
    /// otherwise 1 (so the first purchase doubles the rate).
    pub fn production_multiplier(&self) -> Decimal {
        if self.speed > 0 {
            Decimal::from(self.speed + 1)
        } else {
            Decimal::ONE
        }
    }

    /// Latency multiplier: `discount^validation`.  Diminishing — never zero
    /// and never negative for a discount in `(0, 1]`.
    pub fn latency_factor(&self, discount: Decimal) -> Decimal {
        decimal_pow(discount, self.validation)
    }
}

/// Exponentiation by squaring; underflow toward zero is acceptable here
/// (a vanishing latency factor just means instant validation).
fn decimal_pow(base: Decimal, mut exp: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let mut factor = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result *= factor;
        }
        exp >>= 1;
        if exp > 0 {
            factor *= factor;
        }
    }
    result
}
