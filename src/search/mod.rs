//! Backtracking search, solution records and result validation

pub mod engine;
pub mod solution;
pub mod validator;

pub use engine::{solve_all, solve_share, SearchEngine, SearchStatistics};
pub use solution::{Solution, SolutionSet, MAX_BOARD_SIZE};
pub use validator::{SolutionValidator, ValidationReport, Violation};
