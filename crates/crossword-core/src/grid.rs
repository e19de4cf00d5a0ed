use crate::CrosswordError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the grid (row, col), zero-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `distance` cells along `direction`
    pub fn advance(self, direction: Direction, distance: usize) -> Self {
        let (row_step, col_step) = direction.steps();
        Self::new(self.row + row_step * distance, self.col + col_step * distance)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The two directions a word can run in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Column-increasing
    Across,
    /// Row-increasing
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    /// (row step, col step); exactly one of them is 1
    pub const fn steps(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    pub(crate) const fn signed_steps(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    pub fn from_steps(row_step: usize, col_step: usize) -> Option<Self> {
        match (row_step, col_step) {
            (0, 1) => Some(Direction::Across),
            (1, 0) => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "Across"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// A single cell: either a letter or a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Block,
    Letter(char),
}

impl Cell {
    pub fn is_block(self) -> bool {
        matches!(self, Cell::Block)
    }

    pub fn is_letter(self) -> bool {
        matches!(self, Cell::Letter(_))
    }

    pub fn letter(self) -> Option<char> {
        match self {
            Cell::Letter(ch) => Some(ch),
            Cell::Block => None,
        }
    }
}

/// Square matrix of cells. Every cell starts as a block and only turns into a
/// letter when a word is placed over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

/// Unchecked wire form of [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = CrosswordError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Self::from_parts(raw.size, raw.cells)
    }
}

impl Grid {
    /// Create an all-block grid of `size` x `size`
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Block; size * size],
        }
    }

    /// Build a grid from a row-major cell list, which must hold exactly
    /// `size * size` cells
    pub fn from_parts(size: usize, cells: Vec<Cell>) -> Result<Self, CrosswordError> {
        let expected = size.checked_mul(size).ok_or_else(|| {
            CrosswordError::malformed(format!("grid size {} is too large", size))
        })?;
        if cells.len() != expected {
            return Err(CrosswordError::malformed(format!(
                "a {0}x{0} grid needs {1} cells, found {2}",
                size,
                expected,
                cells.len()
            )));
        }
        Ok(Self { size, cells })
    }

    /// Parse a grid from rows of text. `#`, `.` and spaces are blocks, anything
    /// else is a letter. Returns `None` unless the rows form a square.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let size = rows.len();
        let mut grid = Self::new(size);
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.as_ref().chars().collect();
            if chars.len() != size {
                return None;
            }
            for (col, ch) in chars.into_iter().enumerate() {
                if !matches!(ch, '#' | '.' | ' ') {
                    grid.set(Position::new(row, col), Cell::Letter(ch.to_ascii_uppercase()));
                }
            }
        }
        Some(grid)
    }

    /// Rows of text in the format accepted by [`Grid::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.cell(Position::new(row, col)).letter().unwrap_or('#'))
                    .collect()
            })
            .collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Bounds check on signed coordinates
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Get the cell at a position. Panics if out of bounds.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Get the cell at signed coordinates, `None` when off-grid
    pub fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if self.in_bounds(row, col) {
            Some(self.cell(Position::new(row as usize, col as usize)))
        } else {
            None
        }
    }

    /// Get the letter at a position, `None` for blocks and off-grid positions
    pub fn get(&self, pos: Position) -> Option<char> {
        if self.contains(pos) {
            self.cell(pos).letter()
        } else {
            None
        }
    }

    pub fn is_letter(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// Write a word into the grid. The caller must have checked the placement.
    pub(crate) fn place(&mut self, word: &str, start: Position, direction: Direction) {
        for (i, ch) in word.chars().enumerate() {
            self.set(start.advance(direction, i), Cell::Letter(ch));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_block())
    }

    pub fn letter_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_letter()).count()
    }

    /// All letter cells in row-major order
    pub fn letter_positions(&self) -> Vec<(Position, char)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                cell.letter()
                    .map(|ch| (Position::new(idx / self.size, idx % self.size), ch))
            })
            .collect()
    }

    fn previous(&self, pos: Position, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Across if pos.col > 0 => Some(Position::new(pos.row, pos.col - 1)),
            Direction::Down if pos.row > 0 => Some(Position::new(pos.row - 1, pos.col)),
            _ => None,
        }
    }

    /// True if `pos` is a letter whose predecessor along `direction` is a block
    /// or the edge of the grid.
    pub fn starts_run(&self, pos: Position, direction: Direction) -> bool {
        self.is_letter(pos)
            && self
                .previous(pos, direction)
                .map_or(true, |prev| !self.is_letter(prev))
    }

    /// Walk back from `pos` to the first letter of its run along `direction`
    pub fn word_start(&self, pos: Position, direction: Direction) -> Option<Position> {
        if !self.is_letter(pos) {
            return None;
        }
        let mut start = pos;
        while let Some(prev) = self.previous(start, direction) {
            if !self.is_letter(prev) {
                break;
            }
            start = prev;
        }
        Some(start)
    }

    /// Every cell of the run through `pos` along `direction`, first to last.
    /// Empty when `pos` is a block.
    pub fn word_cells(&self, pos: Position, direction: Direction) -> Vec<Position> {
        let Some(start) = self.word_start(pos, direction) else {
            return Vec::new();
        };
        let mut cells = Vec::new();
        let mut current = start;
        while self.is_letter(current) {
            cells.push(current);
            current = current.advance(direction, 1);
        }
        cells
    }

    /// Letters of the run starting at `start`, read until a block or the edge
    pub fn read_word(&self, start: Position, direction: Direction) -> String {
        let mut word = String::new();
        let mut current = start;
        while let Some(ch) = self.get(current) {
            word.push(ch);
            current = current.advance(direction, 1);
        }
        word
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(&["CAT.", "O...", "L...", "D..."]).unwrap()
    }

    #[test]
    fn test_new_grid_is_all_blocks() {
        let grid = Grid::new(16);
        assert_eq!(grid.size(), 16);
        assert!(grid.is_empty());
        assert_eq!(grid.letter_count(), 0);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(&["AB", "C"]).is_none());
        assert!(Grid::from_rows(&["ABC", "DEF"]).is_none());
    }

    #[test]
    fn test_place_and_read() {
        let mut grid = Grid::new(5);
        grid.place("PARIS", Position::new(2, 0), Direction::Across);
        assert_eq!(grid.read_word(Position::new(2, 0), Direction::Across), "PARIS");
        assert_eq!(grid.get(Position::new(2, 4)), Some('S'));
        assert_eq!(grid.get(Position::new(1, 0)), None);
        assert_eq!(grid.letter_count(), 5);
    }

    #[test]
    fn test_word_start_and_cells() {
        let grid = sample();
        assert_eq!(
            grid.word_start(Position::new(0, 2), Direction::Across),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            grid.word_cells(Position::new(3, 0), Direction::Down),
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(3, 0)
            ]
        );
        assert!(grid.word_cells(Position::new(1, 1), Direction::Down).is_empty());
    }

    #[test]
    fn test_starts_run() {
        let grid = sample();
        assert!(grid.starts_run(Position::new(0, 0), Direction::Across));
        assert!(grid.starts_run(Position::new(0, 0), Direction::Down));
        assert!(!grid.starts_run(Position::new(0, 1), Direction::Across));
        assert!(grid.starts_run(Position::new(0, 1), Direction::Down));
        assert!(!grid.starts_run(Position::new(1, 1), Direction::Down));
    }

    #[test]
    fn test_cell_at_off_grid() {
        let grid = sample();
        assert_eq!(grid.cell_at(-1, 0), None);
        assert_eq!(grid.cell_at(0, 4), None);
        assert_eq!(grid.cell_at(0, 0), Some(Cell::Letter('C')));
        assert_eq!(grid.cell_at(1, 1), Some(Cell::Block));
    }

    #[test]
    fn test_display_round_trips_rows() {
        let grid = sample();
        let text = grid.to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows, vec!["CAT#", "O###", "L###", "D###"]);
        assert_eq!(Grid::from_rows(&rows), Some(grid));
    }

    #[test]
    fn test_from_parts_checks_cell_count() {
        assert!(Grid::from_parts(2, vec![Cell::Block; 4]).is_ok());
        assert!(matches!(
            Grid::from_parts(4, Vec::new()),
            Err(CrosswordError::MalformedPuzzle { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_short_cell_list() {
        let result: Result<Grid, _> = serde_json::from_str(r#"{"size":4,"cells":[]}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("needs 16 cells"), "{}", err);

        let grid = sample();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }

    #[test]
    fn test_direction_steps() {
        assert_eq!(Direction::Across.steps(), (0, 1));
        assert_eq!(Direction::Down.steps(), (1, 0));
        assert_eq!(Direction::from_steps(1, 0), Some(Direction::Down));
        assert_eq!(Direction::from_steps(1, 1), None);
        assert_eq!(Direction::Across.perpendicular(), Direction::Down);
    }
}
