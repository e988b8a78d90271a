// src/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Length mismatch: destination holds {dst} bytes, source holds {src}")]
    LengthMismatch { dst: usize, src: usize },

    #[error("Buffer is empty")]
    EmptyBuffer,

    #[error("Cannot drop {requested} bytes from a buffer of {available}")]
    Truncated { requested: usize, available: usize },

    #[error("No pass pipelines registered")]
    NoPipelines,

    #[error("Pass failed: {0}")]
    Pass(String),
}

pub type Result<T> = std::result::Result<T, SwapError>;
