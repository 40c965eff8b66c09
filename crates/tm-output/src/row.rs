//! Plain data row types written by output backends.

/// Telemetry for one simulation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    /// Wall-clock epoch milliseconds derived from the run start and cadence.
    pub unix_ms:          i64,
    /// Economic units completed this tick.
    pub completed_units:  u64,
    /// Queue entries appended this tick.
    pub produced_entries: u64,
    /// Queue length after the tick settled.
    pub queue_len:        u64,
    /// Units represented by one queue entry after the tick settled.
    pub unit_weight:      u64,
    /// Whether the capacity policy rescaled the queue this tick.
    pub rescaled:         bool,
    /// Total funds after the tick, pre-rendered in scientific notation so
    /// arbitrary magnitudes survive the trip through a flat file.
    pub funds:            String,
}
