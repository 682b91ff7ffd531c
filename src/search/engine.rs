//! Depth-first backtracking search over board columns

use super::Solution;
use crate::board::{is_safe, Board};
use crate::distributed::Share;
use std::fmt;

/// Counters collected while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Queens placed on the board, including ones later backtracked
    pub placements: u64,
    /// Candidate squares rejected by the safety check
    pub rejections: u64,
    /// Complete placements reached
    pub solutions: u64,
}

impl SearchStatistics {
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.placements += other.placements;
        self.rejections += other.rejections;
        self.solutions += other.solutions;
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} placements, {} rejections, {} solutions",
            self.placements, self.rejections, self.solutions
        )
    }
}

/// Exhaustive N-Queens search with a restricted candidate set for column 0
#[derive(Debug, Default)]
pub struct SearchEngine {
    statistics: SearchStatistics,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate every completion of `board` starting at `column`.
    ///
    /// Column 0 only tries the rows in `first_column_rows`, taken as a set:
    /// order and repeats in the slice do not matter, and rows outside the
    /// board are ignored. Every column tries its candidates in ascending
    /// order, so the result order depends only on the candidate set. The
    /// board is left exactly as it was passed in.
    pub fn search(
        &mut self,
        board: &mut Board,
        column: usize,
        first_column_rows: &[usize],
    ) -> Vec<Solution> {
        let mut solutions = Vec::new();
        self.extend(board, column, first_column_rows, &mut solutions);
        solutions
    }

    fn extend(
        &mut self,
        board: &mut Board,
        column: usize,
        first_column_rows: &[usize],
        solutions: &mut Vec<Solution>,
    ) {
        let n = board.size;
        if column == n {
            self.statistics.solutions += 1;
            solutions.push(Solution::from_board(board));
            return;
        }

        if column == 0 {
            for row in (0..n).filter(|row| first_column_rows.contains(row)) {
                self.try_row(board, row, column, first_column_rows, solutions);
            }
        } else {
            for row in 0..n {
                self.try_row(board, row, column, first_column_rows, solutions);
            }
        }
    }

    fn try_row(
        &mut self,
        board: &mut Board,
        row: usize,
        column: usize,
        first_column_rows: &[usize],
        solutions: &mut Vec<Solution>,
    ) {
        if !is_safe(board, row, column) {
            self.statistics.rejections += 1;
            return;
        }

        self.statistics.placements += 1;
        let mut placed = board.place(row, column);
        self.extend(&mut placed, column + 1, first_column_rows, solutions);
    }

    /// Statistics accumulated over all searches run by this engine
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }
}

/// Search one worker's share on a fresh board
pub fn solve_share(board_size: usize, share: &Share) -> (Vec<Solution>, SearchStatistics) {
    let rows: Vec<usize> = share.rows().collect();
    let mut board = Board::new(board_size);
    let mut engine = SearchEngine::new();
    let solutions = engine.search(&mut board, 0, &rows);
    (solutions, engine.statistics())
}

/// Single-worker baseline over all of column 0
pub fn solve_all(board_size: usize) -> Vec<Solution> {
    let rows: Vec<usize> = (0..board_size).collect();
    let mut board = Board::new(board_size);
    SearchEngine::new().search(&mut board, 0, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_counts() {
        let expected = [(1, 1), (2, 0), (3, 0), (4, 2), (5, 10), (6, 4), (7, 40), (8, 92)];
        for (n, count) in expected {
            assert_eq!(solve_all(n).len(), count, "wrong count for n = {}", n);
        }
    }

    #[test]
    fn test_four_queens_order() {
        let solutions = solve_all(4);
        assert_eq!(solutions[0].rows(), &[2, 4, 1, 3]);
        assert_eq!(solutions[1].rows(), &[3, 1, 4, 2]);
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = Board::new(6);
        let mut engine = SearchEngine::new();
        let solutions = engine.search(&mut board, 0, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(solutions.len(), 4);
        assert!(board.is_empty());
    }

    #[test]
    fn test_restricted_first_column() {
        let mut board = Board::new(4);
        let mut engine = SearchEngine::new();

        let solutions = engine.search(&mut board, 0, &[1]);
        assert_eq!(solutions, vec![Solution::new(vec![2, 4, 1, 3])]);

        let solutions = engine.search(&mut board, 0, &[0, 3]);
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_first_column_candidates_are_a_set() {
        let mut board = Board::new(4);
        let mut engine = SearchEngine::new();

        let unsorted = engine.search(&mut board, 0, &[2, 1]);
        assert_eq!(
            unsorted,
            vec![Solution::new(vec![2, 4, 1, 3]), Solution::new(vec![3, 1, 4, 2])]
        );

        let repeated = engine.search(&mut board, 0, &[1, 1]);
        assert_eq!(repeated, vec![Solution::new(vec![2, 4, 1, 3])]);

        let out_of_range = engine.search(&mut board, 0, &[7, 2, 2]);
        assert_eq!(out_of_range, vec![Solution::new(vec![3, 1, 4, 2])]);
        assert!(board.is_empty());
    }

    #[test]
    fn test_empty_candidate_set() {
        let mut board = Board::new(5);
        let solutions = SearchEngine::new().search(&mut board, 0, &[]);
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_all_solutions_valid() {
        for solution in solve_all(8) {
            assert_eq!(solution.size(), 8);
            assert!(solution.is_valid(), "invalid solution {}", solution);
        }
    }

    #[test]
    fn test_statistics() {
        let mut board = Board::new(4);
        let mut engine = SearchEngine::new();
        engine.search(&mut board, 0, &[0, 1, 2, 3]);

        let stats = engine.statistics();
        assert_eq!(stats.solutions, 2);
        assert!(stats.placements >= 4);
        assert!(stats.rejections > 0);
    }

    #[test]
    fn test_solve_share() {
        let share = Share::new(0, 1, 2);
        let (solutions, stats) = solve_share(4, &share);
        assert_eq!(solutions.len(), 2);
        assert_eq!(stats.solutions, 2);
    }
}
