use thiserror::Error;

use tm_core::TmError;

use crate::Upgrade;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A purchase was attempted without the funds to cover it.  Callers
    /// driving a UI should gate the action on
    /// [`TickEngine::can_buy`][crate::TickEngine::can_buy] instead of
    /// reaching this.
    #[error("insufficient funds for {upgrade} upgrade (cost {cost})")]
    InsufficientFunds { upgrade: Upgrade, cost: u64 },

    #[error(transparent)]
    Core(#[from] TmError),
}

pub type EngineResult<T> = Result<T, EngineError>;
