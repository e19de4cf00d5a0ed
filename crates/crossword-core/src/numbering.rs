//! Clue numbering derived purely from grid geometry.

use crate::{Direction, Grid, Placement, Position};
use log::warn;
use serde::{Deserialize, Serialize};

/// Clue text used when a run on the grid matches no placed word
pub const PLACEHOLDER_CLUE: &str = "?";

/// A numbered word read back from the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    pub number: u32,
    pub word: String,
    pub clue: String,
    pub start: Position,
    pub direction: Direction,
}

impl ClueEntry {
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn cells(&self) -> Vec<Position> {
        (0..self.len())
            .map(|i| self.start.advance(self.direction, i))
            .collect()
    }
}

/// Across and down entries, each ordered by clue number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueList {
    pub across: Vec<ClueEntry>,
    pub down: Vec<ClueEntry>,
}

impl ClueList {
    pub fn entries(&self, direction: Direction) -> &[ClueEntry] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }

    /// Look up an entry by its number and direction, e.g. "7 Down"
    pub fn find(&self, number: u32, direction: Direction) -> Option<&ClueEntry> {
        self.entries(direction).iter().find(|e| e.number == number)
    }

    /// The number printed in the corner of `pos`, if any
    pub fn number_at(&self, pos: Position) -> Option<u32> {
        self.iter().find(|e| e.start == pos).map(|e| e.number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClueEntry> {
        self.across.iter().chain(self.down.iter())
    }

    pub fn len(&self) -> usize {
        self.across.len() + self.down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.across.is_empty() && self.down.is_empty()
    }
}

/// Whether `pos` starts a word along `direction`.
///
/// Runs of two or more letters always count. A lone letter only counts when a
/// one-letter answer was placed there in that direction, otherwise every
/// crossing letter would be numbered twice.
fn starts_word(grid: &Grid, placements: &[Placement], pos: Position, direction: Direction) -> bool {
    if !grid.starts_run(pos, direction) {
        return false;
    }
    if grid.is_letter(pos.advance(direction, 1)) {
        return true;
    }
    placements
        .iter()
        .any(|p| p.start == pos && p.direction == direction && p.len() == 1)
}

fn clue_for<'a>(placements: &'a [Placement], word: &str, start: Position) -> &'a str {
    match placements.iter().find(|p| p.word == word) {
        Some(placement) => &placement.clue,
        None => {
            warn!("No placement matches {} at {}", word, start);
            PLACEHOLDER_CLUE
        }
    }
}

/// Scan the grid in row-major order and number every cell that starts a word.
///
/// A cell starting both an across and a down word gets a single number shared
/// by both entries. Clues are matched to reconstructed words by text, taking
/// the first matching placement.
pub fn derive_clues(grid: &Grid, placements: &[Placement]) -> ClueList {
    let mut clues = ClueList::default();
    let mut next_number = 1;

    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let pos = Position::new(row, col);
            let across = starts_word(grid, placements, pos, Direction::Across);
            let down = starts_word(grid, placements, pos, Direction::Down);
            if !across && !down {
                continue;
            }

            let number = next_number;
            next_number += 1;

            for (starts, direction) in [(across, Direction::Across), (down, Direction::Down)] {
                if !starts {
                    continue;
                }
                let word = grid.read_word(pos, direction);
                let entry = ClueEntry {
                    number,
                    clue: clue_for(placements, &word, pos).to_string(),
                    word,
                    start: pos,
                    direction,
                };
                match direction {
                    Direction::Across => clues.across.push(entry),
                    Direction::Down => clues.down.push(entry),
                }
            }
        }
    }

    clues
}
