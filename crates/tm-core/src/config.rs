//! Engine configuration.

use rust_decimal::Decimal;

use crate::{TmError, TmResult};

/// Tuning constants for the economic simulation.
///
/// `Default` reproduces the shipped game balance; tests and the debug layer
/// override individual fields with struct-update syntax:
///
/// ```rust,ignore
/// let config = EngineConfig {
///     base_production_rate: Decimal::from(5),
///     ..EngineConfig::default()
/// };
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Transactions produced per tick before the speed-upgrade multiplier.
    /// Fractional rates accumulate across ticks and discretize into whole
    /// queue entries.  Default: 0.02.
    pub base_production_rate: Decimal,

    /// Milliseconds a queue entry waits before completing, prior to the
    /// validation-upgrade discount.  Default: 4000.
    pub base_validation_latency_ms: Decimal,

    /// Queue length that triggers the first unit-weight rescale.  Grows by
    /// ×1.1 (rounded) at every breach.  Default: 500.
    pub initial_queue_threshold: u64,

    /// Nominal currency value of one completed transaction unit before fee
    /// scaling.  Default: 10.
    pub unit_value: Decimal,

    /// Fee fraction of `unit_value` actually credited per completed unit.
    /// Default: 0.02.
    pub transfer_fee_rate: Decimal,

    /// Multiplier applied to validation latency once per validation-speed
    /// upgrade level.  Must lie in (0, 1] — latency shrinks but never
    /// reaches zero.  Default: 0.99.
    pub latency_discount: Decimal,

    /// Currency cost of one transaction-speed upgrade.  Default: 40.
    pub speed_upgrade_cost: u64,

    /// Currency cost of one validation-speed upgrade.  Default: 120.
    pub validation_upgrade_cost: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_production_rate:       Decimal::new(2, 2), // 0.02
            base_validation_latency_ms: Decimal::from(4_000),
            initial_queue_threshold:    500,
            unit_value:                 Decimal::from(10),
            transfer_fee_rate:          Decimal::new(2, 2), // 0.02
            latency_discount:           Decimal::new(99, 2), // 0.99
            speed_upgrade_cost:         40,
            validation_upgrade_cost:    120,
        }
    }
}

impl EngineConfig {
    /// Check that the configuration describes a runnable economy.
    ///
    /// The engine itself assumes a validated config (all arithmetic is total
    /// over non-negative domains); callers constructing configs from user
    /// input should validate once up front.
    pub fn validate(&self) -> TmResult<()> {
        if self.base_production_rate < Decimal::ZERO {
            return Err(TmError::Config(
                "base_production_rate must be non-negative".into(),
            ));
        }
        if self.base_validation_latency_ms < Decimal::ZERO {
            return Err(TmError::Config(
                "base_validation_latency_ms must be non-negative".into(),
            ));
        }
        if self.initial_queue_threshold == 0 {
            return Err(TmError::Config(
                "initial_queue_threshold must be at least 1".into(),
            ));
        }
        if self.unit_value < Decimal::ZERO {
            return Err(TmError::Config(
                "unit_value must be non-negative".into(),
            ));
        }
        if self.transfer_fee_rate < Decimal::ZERO {
            return Err(TmError::Config(
                "transfer_fee_rate must be non-negative".into(),
            ));
        }
        if self.latency_discount <= Decimal::ZERO || self.latency_discount > Decimal::ONE {
            return Err(TmError::Config(
                "latency_discount must lie in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}
