use crate::{CrosswordError, Grid, Position, Result};
use log::warn;
use serde::{Deserialize, Serialize};

/// Highlight left on a cell after its word is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellMark {
    Correct,
    Incorrect,
}

/// The letters a player has typed, plus lock and highlight state per cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBoard {
    size: usize,
    playable: Vec<bool>,
    letters: Vec<Option<char>>,
    locked: Vec<bool>,
    marks: Vec<Option<CellMark>>,
}

impl PlayerBoard {
    /// Empty board matching the letter cells of `grid`
    pub fn new(grid: &Grid) -> Self {
        let size = grid.size();
        let playable = (0..size * size)
            .map(|idx| grid.is_letter(Position::new(idx / size, idx % size)))
            .collect();
        Self {
            size,
            playable,
            letters: vec![None; size * size],
            locked: vec![false; size * size],
            marks: vec![None; size * size],
        }
    }

    /// Fill a board from rows of text. `.`, `#` and spaces leave a cell empty;
    /// letters typed over blocks or past the edge are skipped with a warning.
    pub fn from_rows<S: AsRef<str>>(grid: &Grid, rows: &[S]) -> Self {
        let mut board = Self::new(grid);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.as_ref().chars().enumerate() {
                if matches!(ch, '.' | '#' | ' ') {
                    continue;
                }
                if let Err(e) = board.set_letter(Position::new(row, col), ch) {
                    warn!("Ignoring {:?}: {}", ch, e);
                }
            }
        }
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.row < self.size && pos.col < self.size).then(|| pos.row * self.size + pos.col)
    }

    fn editable_index(&self, pos: Position) -> Result<usize> {
        let idx = match self.index(pos) {
            Some(idx) if self.playable[idx] => idx,
            _ => {
                return Err(CrosswordError::BlockCell {
                    row: pos.row,
                    col: pos.col,
                })
            }
        };
        if self.locked[idx] {
            return Err(CrosswordError::CellLocked {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(idx)
    }

    /// Type a letter into a cell. Stored uppercased; whitespace clears the cell.
    pub fn set_letter(&mut self, pos: Position, letter: char) -> Result<()> {
        let idx = self.editable_index(pos)?;
        self.letters[idx] = if letter.is_whitespace() {
            None
        } else {
            letter.to_uppercase().next()
        };
        Ok(())
    }

    /// Take the first character of raw input text, the way a one-character
    /// entry box behaves
    pub fn set_input(&mut self, pos: Position, text: &str) -> Result<()> {
        match text.trim().chars().next() {
            Some(ch) => self.set_letter(pos, ch),
            None => self.clear(pos),
        }
    }

    pub fn clear(&mut self, pos: Position) -> Result<()> {
        let idx = self.editable_index(pos)?;
        self.letters[idx] = None;
        Ok(())
    }

    pub fn letter(&self, pos: Position) -> Option<char> {
        self.index(pos).and_then(|idx| self.letters[idx])
    }

    pub fn is_playable(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|idx| self.playable[idx])
    }

    pub fn is_locked(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|idx| self.locked[idx])
    }

    pub fn mark(&self, pos: Position) -> Option<CellMark> {
        self.index(pos).and_then(|idx| self.marks[idx])
    }

    /// Number of playable cells holding a letter
    pub fn filled_count(&self) -> usize {
        self.letters.iter().filter(|l| l.is_some()).count()
    }

    pub fn playable_count(&self) -> usize {
        self.playable.iter().filter(|&&p| p).count()
    }

    pub(crate) fn force(&mut self, pos: Position, letter: char) {
        if let Some(idx) = self.index(pos) {
            self.letters[idx] = Some(letter);
        }
    }

    pub(crate) fn set_mark(&mut self, pos: Position, mark: CellMark) {
        if let Some(idx) = self.index(pos) {
            self.marks[idx] = Some(mark);
        }
    }

    pub(crate) fn lock(&mut self, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.locked[idx] = true;
        }
    }

    /// Freeze every cell, used when the puzzle is finished
    pub(crate) fn lock_all(&mut self) {
        for (locked, &playable) in self.locked.iter_mut().zip(&self.playable) {
            *locked |= playable;
        }
    }
}
