//! Plain-text rendering of grids, clue lists, and score reports.

use crossword_core::{CellMark, ClueList, Direction, GameSummary, Grid, PlayerBoard, Position};
use std::fmt::Write;

/// Draw the grid: `#` for blocks, the clue number (or `.`) for empty cells,
/// and the letter when `solution` is set
pub fn render_grid(grid: &Grid, clues: &ClueList, solution: bool) -> String {
    let mut out = String::new();
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let pos = Position::new(row, col);
            let cell = match grid.get(pos) {
                None => "###".to_string(),
                Some(letter) if solution => format!(" {} ", letter),
                Some(_) => match clues.number_at(pos) {
                    Some(n) => format!("{:<3}", n),
                    None => " . ".to_string(),
                },
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

/// Draw a checked board: wrong letters are shown in lowercase
pub fn render_board(grid: &Grid, board: &PlayerBoard) -> String {
    let mut out = String::new();
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let pos = Position::new(row, col);
            let ch = if !grid.is_letter(pos) {
                '#'
            } else {
                match (board.letter(pos), board.mark(pos)) {
                    (Some(l), Some(CellMark::Incorrect)) => l.to_ascii_lowercase(),
                    (Some(l), _) => l,
                    (None, _) => '_',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

pub fn render_clues(clues: &ClueList) -> String {
    let mut out = String::new();
    for direction in Direction::ALL {
        let _ = writeln!(out, "{}", direction);
        for entry in clues.entries(direction) {
            let _ = writeln!(
                out,
                "  {:>2}. {} ({})",
                entry.number,
                entry.clue,
                entry.len()
            );
        }
    }
    out
}

pub fn render_summary(summary: &GameSummary) -> String {
    let mut out = String::new();
    for record in &summary.records {
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>2} wrong {:>3} pts",
            record.key.word,
            record.direction.to_string(),
            record.wrong_count,
            record.score
        );
    }
    let _ = writeln!(
        out,
        "Total: {} / {}",
        summary.total_score,
        summary.max_score()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_core::{derive_clues, Placement};

    fn grid() -> (Grid, Vec<Placement>) {
        let grid = Grid::from_rows(&["CAT", "O..", "W.."]).unwrap();
        let placements = vec![
            Placement::new("CAT", "Feline pet", Position::new(0, 0), Direction::Across),
            Placement::new("COW", "Dairy animal", Position::new(0, 0), Direction::Down),
        ];
        (grid, placements)
    }

    #[test]
    fn test_render_grid() {
        let (grid, placements) = grid();
        let clues = derive_clues(&grid, &placements);
        assert_eq!(
            render_grid(&grid, &clues, false),
            "1   .  . \n . ######\n . ######\n"
        );
        assert_eq!(
            render_grid(&grid, &clues, true),
            " C  A  T \n O ######\n W ######\n"
        );
    }

    #[test]
    fn test_render_clues() {
        let (grid, placements) = grid();
        let text = render_clues(&derive_clues(&grid, &placements));
        assert_eq!(
            text,
            "Across\n   1. Feline pet (3)\nDown\n   1. Dairy animal (3)\n"
        );
    }
}
