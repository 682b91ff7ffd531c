//! Error types for the distributed N-Queens solver

use thiserror::Error;

/// Errors raised by the partitioning, distribution and aggregation stages.
///
/// A rejected placement during search is never an error; it only drives
/// backtracking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NQueensError {
    #[error("invalid worker count {workers}: at least one worker is required")]
    InvalidWorkerCount { workers: usize },

    #[error("invalid board size {size}: expected 1 to {max} rows", max = crate::search::MAX_BOARD_SIZE)]
    InvalidBoardSize { size: usize },

    #[error("failed to distribute share to worker {rank}: {reason}")]
    DistributionFailure { rank: usize, reason: String },

    #[error("collected {received} result lists but {expected} workers were dispatched")]
    AggregationMismatch { expected: usize, received: usize },

    #[error("worker {rank} reported more than once")]
    DuplicateReport { rank: usize },

    #[error("received a report from rank {rank}, but only {workers} workers exist")]
    UnknownRank { rank: usize, workers: usize },

    #[error("worker {rank} panicked during search")]
    WorkerPanicked { rank: usize },
}

pub type Result<T> = std::result::Result<T, NQueensError>;
