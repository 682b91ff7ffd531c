//! Independent re-verification of search results

use super::{Solution, SolutionSet};
use itertools::Itertools;
use rayon::prelude::*;
use std::fmt;

/// Validates solutions without relying on the search that produced them
pub struct SolutionValidator {
    board_size: usize,
}

/// Why a single solution was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    WrongLength { expected: usize, actual: usize },
    RowOutOfRange { column: usize, row: usize },
    SharedRow { first: usize, second: usize, row: usize },
    SharedDiagonal { first: usize, second: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::WrongLength { expected, actual } => {
                write!(f, "expected {} columns, found {}", expected, actual)
            }
            Violation::RowOutOfRange { column, row } => {
                write!(f, "column {} holds row {}, outside the board", column, row)
            }
            Violation::SharedRow { first, second, row } => {
                write!(f, "columns {} and {} share row {}", first, second, row)
            }
            Violation::SharedDiagonal { first, second } => {
                write!(f, "columns {} and {} share a diagonal", first, second)
            }
        }
    }
}

/// Outcome of validating a list of solutions
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub board_size: usize,
    pub checked: usize,
    pub invalid: Vec<(usize, Violation)>,
    /// Extra copies beyond the first of each solution
    pub duplicates: usize,
    pub count_matches: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty() && self.duplicates == 0 && self.count_matches
    }
}

impl SolutionValidator {
    pub fn new(board_size: usize) -> Self {
        Self { board_size }
    }

    /// Check a single solution, reporting the first violation found
    pub fn check(&self, solution: &Solution) -> Result<(), Violation> {
        let rows = solution.rows();
        if rows.len() != self.board_size {
            return Err(Violation::WrongLength {
                expected: self.board_size,
                actual: rows.len(),
            });
        }

        if let Some((column, &row)) = rows
            .iter()
            .enumerate()
            .find(|&(_, &row)| row == 0 || usize::from(row) > self.board_size)
        {
            return Err(Violation::RowOutOfRange { column, row: usize::from(row) });
        }

        for ((c1, &r1), (c2, &r2)) in rows.iter().enumerate().tuple_combinations() {
            if r1 == r2 {
                return Err(Violation::SharedRow { first: c1, second: c2, row: usize::from(r1) });
            }
            if usize::from(r1.abs_diff(r2)) == c2 - c1 {
                return Err(Violation::SharedDiagonal { first: c1, second: c2 });
            }
        }

        // Cross-check with the pruning predicate used during search
        debug_assert!(solution.is_valid());
        Ok(())
    }

    /// Validate every solution in parallel
    pub fn validate(&self, solutions: &[Solution]) -> ValidationReport {
        let invalid: Vec<(usize, Violation)> = solutions
            .par_iter()
            .enumerate()
            .filter_map(|(i, solution)| self.check(solution).err().map(|v| (i, v)))
            .collect();

        let unique = solutions.iter().unique().count();
        let duplicates = solutions.len() - unique;

        ValidationReport {
            board_size: self.board_size,
            checked: solutions.len(),
            invalid,
            duplicates,
            count_matches: true,
        }
    }

    /// Validate a loaded solution set, including its recorded count
    pub fn validate_set(set: &SolutionSet) -> ValidationReport {
        let mut report = Self::new(set.board_size).validate(&set.solutions);
        report.count_matches = set.count == set.solutions.len();
        report
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Report:")?;
        writeln!(f, "  Board size: {}", self.board_size)?;
        writeln!(f, "  Solutions checked: {}", self.checked)?;
        writeln!(f, "  Invalid solutions: {}", self.invalid.len())?;
        writeln!(f, "  Duplicate solutions: {}", self.duplicates)?;
        if !self.count_matches {
            writeln!(f, "  Recorded count does not match the number of solutions")?;
        }
        for (index, violation) in self.invalid.iter().take(5) {
            writeln!(f, "    - solution {}: {}", index + 1, violation)?;
        }
        if self.invalid.len() > 5 {
            writeln!(f, "    ... and {} more", self.invalid.len() - 5)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::solve_all;

    #[test]
    fn test_search_results_validate() {
        let solutions = solve_all(6);
        let report = SolutionValidator::new(6).validate(&solutions);
        assert!(report.is_valid());
        assert_eq!(report.checked, 4);
    }

    #[test]
    fn test_violations() {
        let validator = SolutionValidator::new(4);

        assert_eq!(
            validator.check(&Solution::new(vec![1, 2, 3])),
            Err(Violation::WrongLength { expected: 4, actual: 3 })
        );
        assert_eq!(
            validator.check(&Solution::new(vec![2, 4, 1, 5])),
            Err(Violation::RowOutOfRange { column: 3, row: 5 })
        );
        assert_eq!(
            validator.check(&Solution::new(vec![2, 4, 2, 3])),
            Err(Violation::SharedRow { first: 0, second: 2, row: 2 })
        );
        assert_eq!(
            validator.check(&Solution::new(vec![1, 3, 2, 4])),
            Err(Violation::SharedDiagonal { first: 0, second: 3 })
        );
    }

    #[test]
    fn test_duplicates_and_count() {
        let solution = Solution::new(vec![2, 4, 1, 3]);
        let mut set = SolutionSet::new(4, 1, vec![solution.clone(), solution]);
        set.count = 3;

        let report = SolutionValidator::validate_set(&set);
        assert_eq!(report.duplicates, 1);
        assert!(!report.count_matches);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_duplicates_count_every_extra_copy() {
        let first = Solution::new(vec![2, 4, 1, 3]);
        let second = Solution::new(vec![3, 1, 4, 2]);
        let solutions = vec![first.clone(), second.clone(), first.clone(), first, second];

        let report = SolutionValidator::new(4).validate(&solutions);
        assert_eq!(report.duplicates, 3);
        assert!(report.to_string().contains("Duplicate solutions: 3"));
    }
}
