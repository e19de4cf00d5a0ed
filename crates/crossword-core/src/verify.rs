//! Word verification, the scoring table, and one-shot locking.

use crate::{CellMark, CrosswordError, Direction, Placement, PlayerBoard, Position, Puzzle, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score awarded by wrong-letter count, index = number of wrong letters
pub const SCORE_TABLE: [u32; 8] = [25, 18, 15, 12, 10, 8, 6, 4];

/// Score for eight or more wrong letters
pub const MIN_SCORE: u32 = 2;

pub fn score_for_wrong_count(wrong: usize) -> u32 {
    SCORE_TABLE.get(wrong).copied().unwrap_or(MIN_SCORE)
}

/// Identity of a scored word: its text and origin cell. The same answer at two
/// origins is scored twice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScoreKey {
    pub word: String,
    pub row: usize,
    pub col: usize,
}

impl ScoreKey {
    pub fn new(word: &str, origin: Position) -> Self {
        Self {
            word: word.to_string(),
            row: origin.row,
            col: origin.col,
        }
    }

    pub fn origin(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.word, self.row, self.col)
    }
}

/// Outcome of checking one word. Never changes once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub key: ScoreKey,
    pub direction: Direction,
    pub wrong_count: usize,
    /// Letter indices within the word that did not match
    pub wrong_positions: Vec<usize>,
    pub score: u32,
    pub locked: bool,
}

impl ScoreRecord {
    pub fn is_perfect(&self) -> bool {
        self.wrong_count == 0
    }
}

/// Indices where the player's letter differs from the solution. Comparison is
/// case-insensitive and a missing letter is always wrong.
pub fn grade(solution: &[char], player: &[Option<char>]) -> Vec<usize> {
    solution
        .iter()
        .enumerate()
        .filter(|&(i, expected)| {
            let given = player.get(i).copied().flatten();
            !given.is_some_and(|ch| ch.to_uppercase().eq(expected.to_uppercase()))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Ledger of checked words. A word is scored at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verifier {
    records: Vec<ScoreRecord>,
}

impl Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in the order the words were checked
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn record(&self, key: &ScoreKey) -> Option<&ScoreRecord> {
        self.records.iter().find(|r| &r.key == key)
    }

    pub fn is_locked(&self, key: &ScoreKey) -> bool {
        self.record(key).is_some_and(|r| r.locked)
    }

    pub fn total_score(&self) -> u32 {
        self.records.iter().map(|r| r.score).sum()
    }

    /// Check the word that starts at `origin` along `direction`
    pub fn check_word(
        &mut self,
        puzzle: &Puzzle,
        origin: Position,
        direction: Direction,
        board: &mut PlayerBoard,
    ) -> Result<ScoreRecord> {
        let placement =
            puzzle
                .placement_at(origin, direction)
                .ok_or(CrosswordError::NotAWord {
                    row: origin.row,
                    col: origin.col,
                })?;
        self.check_placement(placement, board)
    }

    /// Grade a placed word against the board, score it, and lock its cells.
    ///
    /// A perfect word has its letters rewritten to the solution. Wrong letters
    /// stay as typed. Every cell of the word is locked either way.
    pub fn check_placement(
        &mut self,
        placement: &Placement,
        board: &mut PlayerBoard,
    ) -> Result<ScoreRecord> {
        let key = placement.key();
        if self.is_locked(&key) {
            debug!("{} is already locked", key);
            return Err(CrosswordError::AlreadyLocked {
                word: key.word,
                row: key.row,
                col: key.col,
            });
        }

        let cells = placement.cells();
        let solution: Vec<char> = placement.word.chars().collect();
        let player: Vec<Option<char>> = cells.iter().map(|&pos| board.letter(pos)).collect();
        let wrong_positions = grade(&solution, &player);
        let score = score_for_wrong_count(wrong_positions.len());

        for (i, (&pos, &letter)) in cells.iter().zip(&solution).enumerate() {
            if wrong_positions.is_empty() {
                board.force(pos, letter);
            }
            let mark = if wrong_positions.contains(&i) {
                CellMark::Incorrect
            } else {
                CellMark::Correct
            };
            board.set_mark(pos, mark);
            board.lock(pos);
        }

        let record = ScoreRecord {
            key,
            direction: placement.direction,
            wrong_count: wrong_positions.len(),
            wrong_positions,
            score,
            locked: true,
        };
        info!(
            "Checked {}: {} wrong, {} points",
            record.key, record.wrong_count, record.score
        );
        self.records.push(record.clone());
        Ok(record)
    }

    /// Check every placed word that is not locked yet; locked words are skipped
    pub fn check_all(&mut self, puzzle: &Puzzle, board: &mut PlayerBoard) -> Vec<ScoreRecord> {
        puzzle
            .placements
            .iter()
            .filter_map(|p| {
                if self.is_locked(&p.key()) {
                    return None;
                }
                self.check_placement(p, board).ok()
            })
            .collect()
    }
}
