//! Error type shared by every algorithm in the crate.

use thiserror::Error;

/// Unified error type for spmat
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpmatError {
    #[error("dimension mismatch: left operand has {left_cols} columns, right operand has {right_rows} rows")]
    DimensionMismatch { left_cols: usize, right_rows: usize },
    #[error("matrix is not square ({rows} x {cols})")]
    NotSquare { rows: usize, cols: usize },
    #[error("singular matrix: zero pivot at elimination step {step}")]
    SingularMatrix { step: usize },
    #[error("invalid compressed-row structure: {0}")]
    InvalidStructure(String),
    #[error("value {value} does not fit the index type")]
    IndexOverflow { value: usize },
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpmatError>;
