//! Distributed N-Queens Solver
//!
//! Enumerates every placement of N non-attacking queens on an N×N board.
//! Column 0's rows are split into contiguous shares, each share is searched
//! by an independent worker, and the per-worker solution lists are merged in
//! rank order.

pub mod board;
pub mod config;
pub mod distributed;
pub mod error;
pub mod logging;
pub mod search;
pub mod utils;

pub use config::Settings;
pub use distributed::{partition, run_distributed, RunReport, Share};
pub use error::NQueensError;
pub use search::{Solution, SolutionSet};

use anyhow::Result;

/// Main entry point: run the distributed search described by `settings`
pub fn solve(settings: &Settings) -> Result<RunReport> {
    settings.validate()?;
    Ok(run_distributed(settings.board.size, settings.workers.count)?)
}
