//! Collective primitives between the coordinator and its workers.
//!
//! Distribute sends exactly one share to each rank over a dedicated channel.
//! Collect reads one report per rank from a shared channel and returns the
//! reports in rank order.

use super::Share;
use crate::error::{NQueensError, Result};
use crate::search::{SearchStatistics, Solution};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::time::Duration;

/// Everything a worker hands back after searching its share
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub rank: usize,
    pub share: Share,
    pub solutions: Vec<Solution>,
    pub statistics: SearchStatistics,
    pub elapsed: Duration,
}

/// Channel endpoints owned by one worker
pub struct WorkerEndpoint {
    pub rank: usize,
    share_rx: Receiver<Share>,
    report_tx: Sender<WorkerReport>,
}

/// Channel endpoints owned by the coordinator
pub struct CoordinatorEndpoint {
    share_txs: Vec<Sender<Share>>,
    report_rx: Receiver<WorkerReport>,
}

/// Create connected endpoints for `workers` ranks
pub fn create_endpoints(workers: usize) -> (CoordinatorEndpoint, Vec<WorkerEndpoint>) {
    // The coordinator keeps no report sender, so collect ends once every
    // worker has dropped its endpoint.
    let (report_tx, report_rx) = unbounded();

    let mut share_txs = Vec::with_capacity(workers);
    let mut endpoints = Vec::with_capacity(workers);
    for rank in 0..workers {
        let (share_tx, share_rx) = bounded(1);
        share_txs.push(share_tx);
        endpoints.push(WorkerEndpoint {
            rank,
            share_rx,
            report_tx: report_tx.clone(),
        });
    }

    (CoordinatorEndpoint { share_txs, report_rx }, endpoints)
}

impl CoordinatorEndpoint {
    /// Send share `i` to rank `i`. Consumes the share senders.
    pub fn distribute(&mut self, shares: Vec<Share>) -> Result<()> {
        if shares.len() != self.share_txs.len() {
            return Err(NQueensError::DistributionFailure {
                rank: shares.len().min(self.share_txs.len()),
                reason: format!(
                    "{} shares for {} workers",
                    shares.len(),
                    self.share_txs.len()
                ),
            });
        }

        for (rank, (tx, share)) in self.share_txs.drain(..).zip(shares).enumerate() {
            tx.send(share).map_err(|_| NQueensError::DistributionFailure {
                rank,
                reason: "worker endpoint closed".to_string(),
            })?;
        }
        Ok(())
    }

    /// Block until every worker has reported or gone away.
    ///
    /// Fails if any rank is missing, reports twice or is out of range.
    pub fn collect(self, expected: usize) -> Result<Vec<WorkerReport>> {
        let mut slots: Vec<Option<WorkerReport>> = vec![None; expected];
        let mut received = 0;

        while let Ok(report) = self.report_rx.recv() {
            let rank = report.rank;
            let slot = slots.get_mut(rank).ok_or(NQueensError::UnknownRank {
                rank,
                workers: expected,
            })?;
            if slot.is_some() {
                return Err(NQueensError::DuplicateReport { rank });
            }
            *slot = Some(report);
            received += 1;
        }

        if received != expected {
            return Err(NQueensError::AggregationMismatch { expected, received });
        }
        Ok(slots.into_iter().flatten().collect())
    }
}

impl WorkerEndpoint {
    /// Wait for this worker's share
    pub fn receive_share(&self) -> Result<Share> {
        let share = self
            .share_rx
            .recv()
            .map_err(|_| NQueensError::DistributionFailure {
                rank: self.rank,
                reason: "coordinator closed the channel before sending a share".to_string(),
            })?;
        if share.rank != self.rank {
            return Err(NQueensError::DistributionFailure {
                rank: self.rank,
                reason: format!("received the share for rank {}", share.rank),
            });
        }
        Ok(share)
    }

    /// Hand the local results back to the coordinator
    pub fn report(self, report: WorkerReport) -> Result<()> {
        let rank = self.rank;
        self.report_tx
            .send(report)
            .map_err(|_| NQueensError::DistributionFailure {
                rank,
                reason: "coordinator stopped collecting".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(rank: usize, share: Share) -> WorkerReport {
        WorkerReport {
            rank,
            share,
            solutions: Vec::new(),
            statistics: SearchStatistics::default(),
            elapsed: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_distribute_and_collect() {
        let (mut coordinator, workers) = create_endpoints(3);
        let shares = vec![Share::new(0, 0, 1), Share::new(1, 1, 1), Share::new(2, 2, 2)];
        coordinator.distribute(shares.clone()).unwrap();

        // Report out of rank order
        for worker in workers.into_iter().rev() {
            let share = worker.receive_share().unwrap();
            assert_eq!(share, shares[worker.rank]);
            let rank = worker.rank;
            worker.report(report(rank, share)).unwrap();
        }

        let reports = coordinator.collect(3).unwrap();
        let ranks: Vec<usize> = reports.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    fn test_share_count_mismatch() {
        let (mut coordinator, _workers) = create_endpoints(2);
        let err = coordinator.distribute(vec![Share::new(0, 0, 4)]).unwrap_err();
        assert!(matches!(err, NQueensError::DistributionFailure { .. }));
    }

    #[test]
    fn test_missing_report() {
        let (mut coordinator, mut workers) = create_endpoints(2);
        coordinator
            .distribute(vec![Share::new(0, 0, 2), Share::new(1, 2, 2)])
            .unwrap();

        let silent = workers.pop().unwrap();
        drop(silent);
        let worker = workers.pop().unwrap();
        let share = worker.receive_share().unwrap();
        worker.report(report(0, share)).unwrap();

        assert_eq!(
            coordinator.collect(2).unwrap_err(),
            NQueensError::AggregationMismatch { expected: 2, received: 1 }
        );
    }

    #[test]
    fn test_duplicate_report() {
        let (coordinator, workers) = create_endpoints(2);
        let share = Share::new(0, 0, 1);
        for worker in workers {
            worker.report(report(0, share)).unwrap();
        }
        assert_eq!(
            coordinator.collect(2).unwrap_err(),
            NQueensError::DuplicateReport { rank: 0 }
        );
    }

    #[test]
    fn test_worker_without_share() {
        let (coordinator, workers) = create_endpoints(1);
        drop(coordinator);
        let err = workers[0].receive_share().unwrap_err();
        assert!(matches!(err, NQueensError::DistributionFailure { rank: 0, .. }));
    }
}
