//! Merging per-worker results into the final solution list

use super::transport::WorkerReport;
use crate::error::{NQueensError, Result};
use crate::search::{SearchStatistics, Solution};
use serde::Serialize;
use std::time::Duration;

/// Final result of a distributed run
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub solutions: Vec<Solution>,
    pub count: usize,
    pub max_worker_elapsed: Duration,
    pub statistics: SearchStatistics,
    pub workers: Vec<WorkerSummary>,
}

/// Per-worker line of the run summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerSummary {
    pub rank: usize,
    pub first_row: usize,
    pub rows: usize,
    pub solutions: usize,
    pub placements: u64,
    pub elapsed_ms: f64,
}

/// Concatenate worker solution lists in rank order.
///
/// `reports` must hold exactly one report per rank `0..expected_workers`.
pub fn aggregate(mut reports: Vec<WorkerReport>, expected_workers: usize) -> Result<Aggregate> {
    if reports.len() != expected_workers {
        return Err(NQueensError::AggregationMismatch {
            expected: expected_workers,
            received: reports.len(),
        });
    }

    reports.sort_by_key(|report| report.rank);
    for (rank, report) in reports.iter().enumerate() {
        if report.rank >= expected_workers {
            return Err(NQueensError::UnknownRank {
                rank: report.rank,
                workers: expected_workers,
            });
        }
        if report.rank != rank {
            // Sorted and in range, so a skipped rank means a repeated one
            return Err(NQueensError::DuplicateReport { rank: report.rank });
        }
    }

    let total: usize = reports.iter().map(|report| report.solutions.len()).sum();
    let mut solutions = Vec::with_capacity(total);
    let mut statistics = SearchStatistics::default();
    let mut max_worker_elapsed = Duration::ZERO;
    let mut workers = Vec::with_capacity(reports.len());

    for report in reports {
        workers.push(WorkerSummary {
            rank: report.rank,
            first_row: report.share.start,
            rows: report.share.len,
            solutions: report.solutions.len(),
            placements: report.statistics.placements,
            elapsed_ms: report.elapsed.as_secs_f64() * 1000.0,
        });
        statistics.merge(&report.statistics);
        max_worker_elapsed = max_worker_elapsed.max(report.elapsed);
        solutions.extend(report.solutions);
    }

    Ok(Aggregate {
        count: solutions.len(),
        solutions,
        max_worker_elapsed,
        statistics,
        workers,
    })
}
