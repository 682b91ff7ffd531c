//! Static partitioning of the first column's rows across workers

use crate::error::{NQueensError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A contiguous block of column-0 rows assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub rank: usize,
    pub start: usize,
    pub len: usize,
}

impl Share {
    pub fn new(rank: usize, start: usize, len: usize) -> Self {
        Self { rank, start, len }
    }

    /// 0-based rows covered by this share
    pub fn rows(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "rank {}: (empty)", self.rank)
        } else {
            write!(
                f,
                "rank {}: rows {}..={} ({} row{})",
                self.rank,
                self.start,
                self.start + self.len - 1,
                self.len,
                if self.len == 1 { "" } else { "s" }
            )
        }
    }
}

/// Split `n` rows into `workers` contiguous shares of near-equal size.
///
/// Uses `n = (n / m) * (m - n % m) + (n / m + 1) * (n % m)`: the
/// `m - n % m` smaller shares come first, followed by the `n % m` shares
/// that are one row larger. When `workers > n` some shares are empty.
pub fn partition(n: usize, workers: usize) -> Result<Vec<Share>> {
    if workers == 0 {
        return Err(NQueensError::InvalidWorkerCount { workers });
    }

    let small = n / workers;
    let large_count = n % workers;
    let small_count = workers - large_count;

    let mut shares = Vec::with_capacity(workers);
    let mut start = 0;
    for rank in 0..workers {
        let len = if rank < small_count { small } else { small + 1 };
        shares.push(Share::new(rank, start, len));
        start += len;
    }

    debug_assert_eq!(start, n);
    Ok(shares)
}
