//! Board state and the pruning predicate used by the search

pub mod grid;
pub mod safety;

pub use grid::{Board, PlacementGuard};
pub use safety::{is_safe, is_valid_placement};
