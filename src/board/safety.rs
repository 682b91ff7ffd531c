//! Placement safety checks

use super::Board;

/// Check whether a queen can be placed at `(row, col)`.
///
/// Only columns `0..col` may hold queens, so it is enough to look left:
/// along the row, and along the up-left and down-left diagonals.
/// Out of range coordinates are never safe.
pub fn is_safe(board: &Board, row: usize, col: usize) -> bool {
    let n = board.size;
    if row >= n || col >= n {
        return false;
    }

    // Row on the left side
    if (0..col).any(|c| board.get(row, c)) {
        return false;
    }

    // Upper-left diagonal
    let (mut r, mut c) = (row, col);
    loop {
        if board.get(r, c) {
            return false;
        }
        if r == 0 || c == 0 {
            break;
        }
        r -= 1;
        c -= 1;
    }

    // Lower-left diagonal
    let (mut r, mut c) = (row, col);
    loop {
        if board.get(r, c) {
            return false;
        }
        if r + 1 == n || c == 0 {
            break;
        }
        r += 1;
        c -= 1;
    }

    true
}

/// Re-check a complete placement column by column.
///
/// `rows` are 0-based row indices, one per column. Each queen is checked
/// against the queens to its left only, exactly as during search.
pub fn is_valid_placement(rows: &[usize]) -> bool {
    let mut board = Board::new(rows.len());
    for (col, &row) in rows.iter().enumerate() {
        if !is_safe(&board, row, col) {
            return false;
        }
        let idx = board.index(row, col);
        board.cells[idx] = true;
    }
    true
}
