//! Crossword construction and verification engine.
//!
//! Lays a set of answers out on a square grid, numbers the resulting grid,
//! and scores the letters a player enters against the solution.

mod board;
mod config;
mod constraint;
mod error;
mod game;
mod generator;
mod grid;
mod numbering;
mod selection;
mod verify;

#[cfg(test)]
mod tests;

pub use board::{CellMark, PlayerBoard};
pub use config::{GeneratorConfig, SelectionConfig, DEFAULT_GRID_SIZE, DEFAULT_WORDS_TO_PICK};
pub use constraint::fits;
pub use error::{CrosswordError, Result};
pub use game::{feedback_word, Game, GameSummary};
pub use generator::{Generator, Placement, Puzzle};
pub use grid::{Cell, Direction, Grid, Position};
pub use numbering::{derive_clues, ClueEntry, ClueList, PLACEHOLDER_CLUE};
pub use selection::{
    default_questions, normalize_answer, Question, QuestionPool, WordSetSelector, WordSpec,
};
pub use verify::{grade, score_for_wrong_count, ScoreKey, ScoreRecord, Verifier, MIN_SCORE, SCORE_TABLE};
