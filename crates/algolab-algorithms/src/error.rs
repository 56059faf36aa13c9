//! Error types for algorithm input validation.

use thiserror::Error;

/// Input that an algorithm cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    /// Start and finish arrays differ in length.
    #[error("endpoint arrays differ in length: {left} left vs {right} right")]
    EndpointCountMismatch { left: usize, right: usize },

    /// A job finishes before it starts.
    #[error("job {index} finishes at {finish} before it starts at {start}")]
    ReversedInterval {
        index: usize,
        start: i32,
        finish: i32,
    },

    /// A flattened board whose length is not a perfect square.
    #[error("prize board with {len} cells is not square")]
    NonSquareBoard { len: usize },

    /// A negative weight in an independent-set instance.
    #[error("weight {index} is negative ({weight})")]
    NegativeWeight { index: usize, weight: i32 },

    /// A total that does not fit in an `i32` answer.
    #[error("answer overflows a 32-bit integer")]
    Overflow,

    /// A board row whose length differs from the number of rows.
    #[error("prize board row {row} has {len} cells, expected {expected}")]
    RaggedBoard {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Result type alias for algorithm input conversion.
pub type Result<T> = std::result::Result<T, AlgorithmError>;
