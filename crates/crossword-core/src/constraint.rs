//! Legality check for a single hypothetical word placement.

use crate::{Cell, Direction, Grid};

fn holds_letter(cell: Option<Cell>) -> bool {
    cell.is_some_and(Cell::is_letter)
}

/// Check whether `word` can be written starting at (`row`, `col`) along
/// `direction` without breaking the grid.
///
/// A placement is legal when:
/// - both its first and last cell lie on the grid;
/// - every target cell is a block or already holds the same letter;
/// - every block it would fill has blocks (or the edge) on both sides
///   perpendicular to `direction`, so no two words run side by side;
/// - the cells just before the first letter and just after the last letter
///   are blocks or off-grid, so the word cannot merge with a collinear one;
/// - no two consecutive target cells are already letters, since that run
///   belongs to a word in the same direction.
///
/// Coordinates are signed so that callers can probe starts that fall off the
/// top or left edge.
pub fn fits(grid: &Grid, word: &str, row: isize, col: isize, direction: Direction) -> bool {
    let letters: Vec<char> = word.chars().collect();
    if letters.is_empty() {
        return false;
    }

    let (row_step, col_step) = direction.signed_steps();
    let last = letters.len() as isize - 1;
    let (end_row, end_col) = (row + row_step * last, col + col_step * last);
    if !grid.in_bounds(row, col) || !grid.in_bounds(end_row, end_col) {
        return false;
    }

    // Perpendicular offset is the step with its axes swapped
    let (perp_row, perp_col) = (col_step, row_step);

    let mut previous_filled = false;
    for (i, &ch) in letters.iter().enumerate() {
        let r = row + row_step * i as isize;
        let c = col + col_step * i as isize;
        match grid.cell_at(r, c) {
            Some(Cell::Letter(existing)) if existing != ch => return false,
            Some(Cell::Letter(_)) => {
                if previous_filled {
                    return false;
                }
                previous_filled = true;
            }
            _ => {
                previous_filled = false;
                for offset in [-1, 1] {
                    if holds_letter(grid.cell_at(r + perp_row * offset, c + perp_col * offset)) {
                        return false;
                    }
                }
            }
        }
    }

    !holds_letter(grid.cell_at(row - row_step, col - col_step))
        && !holds_letter(grid.cell_at(end_row + row_step, end_col + col_step))
}
