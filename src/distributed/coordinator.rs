//! Coordinator that partitions the work, runs the workers and gathers results

use super::aggregate::{aggregate, WorkerSummary};
use super::partition::{partition, Share};
use super::transport::{create_endpoints, WorkerEndpoint, WorkerReport};
use crate::error::{NQueensError, Result};
use crate::search::{solve_share, SearchStatistics, Solution, MAX_BOARD_SIZE};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Stages of a single run. There is no way back to an earlier stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    Init,
    Partitioned,
    Distributed,
    Searching,
    Collected,
    Aggregated,
    Done,
}

/// Everything the coordinator knows once a run is finished
#[derive(Debug, Clone)]
pub struct RunReport {
    pub board_size: usize,
    pub worker_count: usize,
    pub shares: Vec<Share>,
    pub solutions: Vec<Solution>,
    pub count: usize,
    pub max_worker_elapsed: Duration,
    pub total_elapsed: Duration,
    pub statistics: SearchStatistics,
    pub workers: Vec<WorkerSummary>,
}

/// Drives one distributed run over a fixed set of worker threads
pub struct Coordinator {
    board_size: usize,
    worker_count: usize,
    phase: RunPhase,
}

impl Coordinator {
    pub fn new(board_size: usize, worker_count: usize) -> Self {
        Self {
            board_size,
            worker_count,
            phase: RunPhase::Init,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    fn advance(&mut self, next: RunPhase) {
        debug_assert!(next > self.phase);
        debug!(from = ?self.phase, to = ?next, "run phase");
        self.phase = next;
    }

    /// Partition, distribute, search, collect and aggregate.
    ///
    /// Rank 0 is a worker like any other; the calling thread only
    /// coordinates. Any failure aborts the whole run.
    pub fn run(self) -> Result<RunReport> {
        let board_size = self.board_size;
        self.run_with(move |endpoint| run_worker(endpoint, board_size))
    }

    /// `run` with a custom body for every worker thread
    fn run_with<W>(mut self, worker: W) -> Result<RunReport>
    where
        W: Fn(WorkerEndpoint) + Sync,
    {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(NQueensError::InvalidBoardSize {
                size: self.board_size,
            });
        }

        let start = Instant::now();
        let board_size = self.board_size;
        let worker_count = self.worker_count;

        let shares = partition(board_size, worker_count)?;
        self.advance(RunPhase::Partitioned);
        for share in &shares {
            debug!(%share, "planned share");
        }

        let (mut coordinator, endpoints) = create_endpoints(worker_count);
        let worker = &worker;

        let outcome = thread::scope(|scope| {
            let handles: Vec<_> = endpoints
                .into_iter()
                .map(|endpoint| {
                    let rank = endpoint.rank;
                    let handle = thread::Builder::new()
                        .name(format!("nqueens-worker-{}", rank))
                        .spawn_scoped(scope, move || worker(endpoint));
                    (rank, handle)
                })
                .collect();

            let distributed = coordinator.distribute(shares.clone());
            let collected = match distributed {
                Ok(()) => {
                    self.advance(RunPhase::Distributed);
                    self.advance(RunPhase::Searching);
                    coordinator.collect(worker_count)
                }
                Err(err) => {
                    drop(coordinator);
                    Err(err)
                }
            };

            // Join every worker before returning so a panic is reported
            // instead of propagating out of the scope.
            let mut failure = None;
            for (rank, handle) in handles {
                let failed = match handle {
                    Ok(handle) => handle
                        .join()
                        .err()
                        .map(|_| NQueensError::WorkerPanicked { rank }),
                    Err(err) => Some(NQueensError::DistributionFailure {
                        rank,
                        reason: format!("failed to spawn worker thread: {}", err),
                    }),
                };
                if failure.is_none() {
                    failure = failed;
                }
            }

            match failure {
                Some(err) => Err(err),
                None => collected,
            }
        });

        let reports = outcome?;
        self.advance(RunPhase::Collected);

        let merged = aggregate(reports, worker_count)?;
        self.advance(RunPhase::Aggregated);

        let report = RunReport {
            board_size,
            worker_count,
            shares,
            count: merged.count,
            solutions: merged.solutions,
            max_worker_elapsed: merged.max_worker_elapsed,
            total_elapsed: start.elapsed(),
            statistics: merged.statistics,
            workers: merged.workers,
        };
        self.advance(RunPhase::Done);

        info!(
            board_size,
            workers = worker_count,
            solutions = report.count,
            max_worker_ms = report.max_worker_elapsed.as_secs_f64() * 1000.0,
            "run finished"
        );
        Ok(report)
    }
}

/// Body of one worker thread: wait for a share, search it, report back.
///
/// A worker that never gets its share exits without reporting; the
/// coordinator then sees a missing rank at collect time.
fn run_worker(endpoint: WorkerEndpoint, board_size: usize) {
    let start = Instant::now();
    let rank = endpoint.rank;

    let share = match endpoint.receive_share() {
        Ok(share) => share,
        Err(err) => {
            error!(rank, %err, "worker did not receive a share");
            return;
        }
    };

    if share.is_empty() {
        debug!(rank, "empty share, nothing to search");
    }

    let (solutions, statistics) = solve_share(board_size, &share);
    let elapsed = start.elapsed();
    debug!(
        rank,
        solutions = solutions.len(),
        placements = statistics.placements,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "worker finished"
    );

    let report = WorkerReport {
        rank,
        share,
        solutions,
        statistics,
        elapsed,
    };
    if let Err(err) = endpoint.report(report) {
        error!(rank, %err, "failed to report results");
    }
}

/// Run the full pipeline for one board size and worker count
pub fn run_distributed(board_size: usize, worker_count: usize) -> Result<RunReport> {
    Coordinator::new(board_size, worker_count).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::solve_all;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_distributed_matches_single_worker() {
        for n in 1..=8 {
            let baseline = solve_all(n).len();
            for m in [1, 2, 3, n, n + 2] {
                let report = run_distributed(n, m).unwrap();
                assert_eq!(report.count, baseline, "n = {}, m = {}", n, m);
                assert_eq!(report.solutions.len(), report.count);
            }
        }
    }

    #[test]
    fn test_eight_queens() {
        let report = run_distributed(8, 4).unwrap();
        assert_eq!(report.count, 92);
        assert_eq!(report.workers.len(), 4);
        assert_eq!(report.shares.len(), 4);
    }

    #[test]
    fn test_deterministic_order() {
        let first = run_distributed(7, 3).unwrap();
        let second = run_distributed(7, 3).unwrap();
        assert_eq!(first.solutions, second.solutions);

        // Rank-order concatenation of ascending shares reproduces the
        // single-worker order.
        assert_eq!(first.solutions, solve_all(7));
    }

    #[test]
    fn test_more_workers_than_rows() {
        let report = run_distributed(4, 7).unwrap();
        assert_eq!(report.count, 2);
        let idle = report.workers.iter().filter(|w| w.rows == 0).count();
        assert!(idle >= 3);
        assert!(report
            .workers
            .iter()
            .filter(|w| w.rows == 0)
            .all(|w| w.solutions == 0));
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(
            run_distributed(8, 0).unwrap_err(),
            NQueensError::InvalidWorkerCount { workers: 0 }
        );
        assert_eq!(
            run_distributed(0, 2).unwrap_err(),
            NQueensError::InvalidBoardSize { size: 0 }
        );
    }

    #[test]
    fn test_oversized_board_rejected() {
        assert_eq!(
            run_distributed(MAX_BOARD_SIZE + 1, 2).unwrap_err(),
            NQueensError::InvalidBoardSize { size: MAX_BOARD_SIZE + 1 }
        );
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let finished = AtomicUsize::new(0);
        let err = Coordinator::new(6, 4)
            .run_with(|endpoint| {
                if endpoint.rank == 1 {
                    let _share = endpoint.receive_share();
                    panic!("search failed on rank 1");
                }
                run_worker(endpoint, 6);
                finished.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap_err();

        assert_eq!(err, NQueensError::WorkerPanicked { rank: 1 });
        assert_eq!(finished.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_silent_worker_aborts_run() {
        let finished = AtomicUsize::new(0);
        let err = Coordinator::new(6, 3)
            .run_with(|endpoint| {
                if endpoint.rank != 2 {
                    run_worker(endpoint, 6);
                    finished.fetch_add(1, Ordering::SeqCst);
                }
            })
            .unwrap_err();

        // Rank 2 drops its endpoint without reading. Depending on timing the
        // share send fails or the report goes missing; both abort the run.
        assert!(
            matches!(
                err,
                NQueensError::DistributionFailure { rank: 2, .. }
                    | NQueensError::AggregationMismatch { expected: 3, received: 2 }
            ),
            "unexpected error: {:?}",
            err
        );
        assert_eq!(finished.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_phase_starts_at_init() {
        let coordinator = Coordinator::new(4, 2);
        assert_eq!(coordinator.phase(), RunPhase::Init);
    }
}
