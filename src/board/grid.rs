//! Board representation and scoped queen placement

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// An N×N board of queen placements, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: usize,
    pub cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Build a board from 0-based row indices, one per column
    pub fn from_rows(rows: &[usize]) -> Result<Self> {
        let size = rows.len();
        let mut board = Self::new(size);
        for (col, &row) in rows.iter().enumerate() {
            board.set(row, col, true)?;
        }
        Ok(board)
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Whether a queen occupies the square. Out of bounds squares are empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[self.index(row, col)]
    }

    /// Set a square, failing on out of bounds coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        if row >= self.size || col >= self.size {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} board",
                row, col, self.size, self.size
            );
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Place a queen for the lifetime of the returned guard.
    ///
    /// The square is cleared when the guard drops, on every exit path.
    /// Callers must pass in-bounds coordinates.
    pub fn place(&mut self, row: usize, col: usize) -> PlacementGuard<'_> {
        let idx = self.index(row, col);
        debug_assert!(!self.cells[idx], "square ({}, {}) already occupied", row, col);
        self.cells[idx] = true;
        PlacementGuard { board: self, idx }
    }

    /// Row holding the queen in `col`, if any
    pub fn queen_in_column(&self, col: usize) -> Option<usize> {
        (0..self.size).find(|&row| self.get(row, col))
    }

    /// Count placed queens
    pub fn queen_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if no queen is placed
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}

/// Scoped queen placement; removes the queen on drop
pub struct PlacementGuard<'a> {
    board: &'a mut Board,
    idx: usize,
}

impl Deref for PlacementGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacementGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacementGuard<'_> {
    fn drop(&mut self) {
        self.board.cells[self.idx] = false;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = if self.get(row, col) { "♛" } else { "·" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
