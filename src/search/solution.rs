//! Solution representation for N-Queens placements

use crate::board::{is_valid_placement, Board};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Largest board a `Solution` can describe
pub const MAX_BOARD_SIZE: usize = u16::MAX as usize;

/// A complete placement: entry `c` is the 1-based row of the queen in column `c`.
///
/// Rows are kept as `u16` in a boxed slice. Large runs hold millions of
/// these, so the per-solution footprint matters more than the board limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution {
    rows: Box<[u16]>,
}

impl Solution {
    /// Create a solution from 1-based rows
    pub fn new(rows: Vec<u16>) -> Self {
        Self {
            rows: rows.into_boxed_slice(),
        }
    }

    /// Read a solution off a fully populated board.
    ///
    /// An empty column, or a board larger than `MAX_BOARD_SIZE`, yields a 0
    /// entry, which `is_valid` rejects.
    pub fn from_board(board: &Board) -> Self {
        let rows = (0..board.size)
            .map(|col| {
                board
                    .queen_in_column(col)
                    .and_then(|row| u16::try_from(row + 1).ok())
                    .unwrap_or(0)
            })
            .collect();
        Self { rows }
    }

    /// 1-based rows, one per column
    pub fn rows(&self) -> &[u16] {
        &self.rows
    }

    /// Board size this solution was found on
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// 0-based rows; `None` if any entry is 0
    pub fn zero_based_rows(&self) -> Option<Vec<usize>> {
        self.rows
            .iter()
            .map(|&row| usize::from(row).checked_sub(1))
            .collect()
    }

    /// Rebuild the board this solution describes
    pub fn to_board(&self) -> Result<Board> {
        let rows = self
            .zero_based_rows()
            .context("Solution contains a 0 row; rows are 1-based")?;
        Board::from_rows(&rows)
    }

    /// Re-verify the placement with the safety checker
    pub fn is_valid(&self) -> bool {
        self.zero_based_rows()
            .is_some_and(|rows| is_valid_placement(&rows))
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// All solutions of one run, as written to and read from disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionSet {
    pub board_size: usize,
    pub worker_count: usize,
    pub count: usize,
    pub solutions: Vec<Solution>,
}

impl SolutionSet {
    pub fn new(board_size: usize, worker_count: usize, solutions: Vec<Solution>) -> Self {
        Self {
            board_size,
            worker_count,
            count: solutions.len(),
            solutions,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write solutions to {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read solutions from {}", path.as_ref().display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse solutions from {}", path.as_ref().display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_board() {
        let board = Board::from_rows(&[1, 3, 0, 2]).unwrap();
        let solution = Solution::from_board(&board);
        assert_eq!(solution.rows(), &[2, 4, 1, 3]);
        assert_eq!(solution.size(), 4);
        assert!(solution.is_valid());
    }

    #[test]
    fn test_invalid_solutions() {
        assert!(!Solution::new(vec![1, 2, 3, 4]).is_valid());
        assert!(!Solution::new(vec![0, 2]).is_valid());
        assert!(!Solution::new(vec![2, 4, 1, 9]).is_valid());
    }

    #[test]
    fn test_to_board() {
        let solution = Solution::new(vec![3, 1, 4, 2]);
        let board = solution.to_board().unwrap();
        assert!(board.get(2, 0));
        assert!(board.get(1, 3));
        assert_eq!(Solution::from_board(&board), solution);

        assert!(Solution::new(vec![0]).to_board().is_err());
    }

    #[test]
    fn test_from_board_with_empty_column() {
        let mut board = Board::new(3);
        board.set(0, 0, true).unwrap();
        let solution = Solution::from_board(&board);
        assert_eq!(solution.rows(), &[1, 0, 0]);
        assert!(!solution.is_valid());
    }

    #[test]
    fn test_display() {
        let solution = Solution::new(vec![2, 4, 1, 3]);
        assert_eq!(solution.to_string(), "2 4 1 3");
    }

    #[test]
    fn test_json_is_plain_array() {
        let set = SolutionSet::new(4, 2, vec![Solution::new(vec![2, 4, 1, 3])]);
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"solutions\":[[2,4,1,3]]"));
        assert_eq!(SolutionSet::from_json(&json).unwrap(), set);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solutions.json");
        let set = SolutionSet::new(
            4,
            1,
            vec![Solution::new(vec![2, 4, 1, 3]), Solution::new(vec![3, 1, 4, 2])],
        );

        set.save_to_file(&path).unwrap();
        let loaded = SolutionSet::load_from_file(&path).unwrap();
        assert_eq!(loaded.count, 2);
        assert_eq!(loaded, set);
    }
}
