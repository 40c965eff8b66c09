use thiserror::Error;
use tm_engine::EngineError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

pub type SimResult<T> = Result<T, SimError>;
