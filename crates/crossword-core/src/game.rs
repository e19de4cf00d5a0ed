use crate::{
    ClueList, CrosswordError, Direction, Generator, GeneratorConfig, Grid, PlayerBoard, Position,
    Puzzle, QuestionPool, Result, ScoreRecord, SelectionConfig, Verifier, WordSetSelector,
    WordSpec,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Result of a finished puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub total_score: u32,
    pub time_secs: u64,
    pub records: Vec<ScoreRecord>,
}

impl GameSummary {
    /// Best possible score for the same number of words
    pub fn max_score(&self) -> u32 {
        self.records.len() as u32 * crate::SCORE_TABLE[0]
    }
}

/// Word describing a 1-10 player rating on the finish screen
pub fn feedback_word(rating: u8) -> &'static str {
    match rating {
        1..=2 => "Very Poor",
        3..=4 => "Needs Improvement",
        5..=6 => "Good",
        7..=8 => "Great",
        9..=10 => "Fantastic",
        _ => "Good",
    }
}

/// Draw a word set and lay it out
fn deal(
    selector: &mut WordSetSelector,
    generator: &mut Generator,
    pool: &QuestionPool,
) -> Result<(Vec<WordSpec>, Puzzle)> {
    let words = selector.select(pool)?;
    let puzzle = generator.generate(&words)?;
    Ok((words, puzzle))
}

/// A puzzle in play: the generated layout, what the player has typed, and
/// the scores of the words checked so far
pub struct Game {
    pool: QuestionPool,
    selector: WordSetSelector,
    generator: Generator,
    /// Selected words, in selection order
    words: Vec<WordSpec>,
    puzzle: Puzzle,
    clues: ClueList,
    board: PlayerBoard,
    verifier: Verifier,
    /// Set on the first letter typed
    started_at: Option<Instant>,
    /// Frozen play time once finished
    elapsed: Duration,
    finished: bool,
}

impl Game {
    /// Create a new game from a question pool with default settings
    pub fn new(pool: QuestionPool) -> Result<Self> {
        Self::with_config(pool, GeneratorConfig::default(), SelectionConfig::default(), None)
    }

    /// Create a reproducible game
    pub fn with_seed(pool: QuestionPool, seed: u64) -> Result<Self> {
        Self::with_config(
            pool,
            GeneratorConfig::default(),
            SelectionConfig::default(),
            Some(seed),
        )
    }

    pub fn with_config(
        pool: QuestionPool,
        generator_config: GeneratorConfig,
        selection: SelectionConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        let grid_size = generator_config.grid_size;
        let (mut selector, mut generator) = match seed {
            Some(seed) => (
                WordSetSelector::with_seed(selection, grid_size, seed),
                Generator::with_config_and_seed(generator_config, seed.wrapping_add(1)),
            ),
            None => (
                WordSetSelector::new(selection, grid_size),
                Generator::with_config(generator_config),
            ),
        };
        let (words, puzzle) = deal(&mut selector, &mut generator, &pool)?;
        Ok(Self::assemble(pool, selector, generator, words, puzzle))
    }

    /// Resume play on an already generated puzzle
    pub fn from_puzzle(puzzle: Puzzle) -> Self {
        let grid_size = puzzle.grid.size();
        let words = puzzle
            .placements
            .iter()
            .map(|p| WordSpec {
                clue: p.clue.clone(),
                answer: p.word.clone(),
            })
            .collect();
        let selection = SelectionConfig::picking(puzzle.placements.len());
        Self::assemble(
            QuestionPool::builtin(),
            WordSetSelector::new(selection, grid_size),
            Generator::with_config(GeneratorConfig::with_grid_size(grid_size)),
            words,
            puzzle,
        )
    }

    fn assemble(
        pool: QuestionPool,
        selector: WordSetSelector,
        generator: Generator,
        words: Vec<WordSpec>,
        puzzle: Puzzle,
    ) -> Self {
        let clues = puzzle.clues();
        let board = PlayerBoard::new(&puzzle.grid);
        Self {
            pool,
            selector,
            generator,
            words,
            puzzle,
            clues,
            board,
            verifier: Verifier::new(),
            started_at: None,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Throw the current puzzle away and deal a fresh one from the same pool.
    /// On failure the current puzzle is kept.
    pub fn new_puzzle(&mut self) -> Result<()> {
        let (words, puzzle) = deal(&mut self.selector, &mut self.generator, &self.pool)?;
        info!("New puzzle with {} words", words.len());
        self.clues = puzzle.clues();
        self.board = PlayerBoard::new(&puzzle.grid);
        self.words = words;
        self.puzzle = puzzle;
        self.verifier = Verifier::new();
        self.started_at = None;
        self.elapsed = Duration::ZERO;
        self.finished = false;
        Ok(())
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn grid(&self) -> &Grid {
        &self.puzzle.grid
    }

    pub fn clues(&self) -> &ClueList {
        &self.clues
    }

    pub fn board(&self) -> &PlayerBoard {
        &self.board
    }

    pub fn words(&self) -> &[WordSpec] {
        &self.words
    }

    pub fn records(&self) -> &[ScoreRecord] {
        self.verifier.records()
    }

    pub fn total_score(&self) -> u32 {
        self.verifier.total_score()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Play time so far; the clock starts with the first letter typed
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(start) if !self.finished => start.elapsed(),
            _ => self.elapsed,
        }
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    fn ensure_playing(&self, pos: Position) -> Result<()> {
        if self.finished {
            return Err(CrosswordError::CellLocked {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(())
    }

    /// Type a letter into a cell
    pub fn set_letter(&mut self, pos: Position, letter: char) -> Result<()> {
        self.ensure_playing(pos)?;
        self.board.set_letter(pos, letter)?;
        self.started_at.get_or_insert_with(Instant::now);
        Ok(())
    }

    /// Type raw text into a cell; only its first character is kept
    pub fn set_input(&mut self, pos: Position, text: &str) -> Result<()> {
        self.ensure_playing(pos)?;
        self.board.set_input(pos, text)?;
        self.started_at.get_or_insert_with(Instant::now);
        Ok(())
    }

    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        self.ensure_playing(pos)?;
        self.board.clear(pos)
    }

    /// The word to highlight when `pos` gains focus.
    ///
    /// Keeps `preferred` when its run through `pos` is longer than one cell,
    /// otherwise takes the longer run (across on a tie). `None` for blocks.
    pub fn active_word(
        &self,
        pos: Position,
        preferred: Option<Direction>,
    ) -> Option<(Direction, Vec<Position>)> {
        let grid = self.grid();
        if !grid.is_letter(pos) {
            return None;
        }
        let across = grid.word_cells(pos, Direction::Across);
        let down = grid.word_cells(pos, Direction::Down);

        let direction = match preferred {
            Some(Direction::Across) if across.len() > 1 => Direction::Across,
            Some(Direction::Down) if down.len() > 1 => Direction::Down,
            _ if across.len() >= down.len() && across.len() > 1 => Direction::Across,
            _ if down.len() > 1 => Direction::Down,
            _ => Direction::Across,
        };
        Some(match direction {
            Direction::Across => (direction, across),
            Direction::Down => (direction, down),
        })
    }

    /// Cells of the entry numbered `number` in `direction`
    pub fn jump_to(&self, number: u32, direction: Direction) -> Option<Vec<Position>> {
        self.clues.find(number, direction).map(|entry| entry.cells())
    }

    /// Check the word starting at `origin`
    pub fn check_word(&mut self, origin: Position, direction: Direction) -> Result<ScoreRecord> {
        self.verifier
            .check_word(&self.puzzle, origin, direction, &mut self.board)
    }

    /// Check the word running through `pos`, wherever it starts
    pub fn check_word_at(&mut self, pos: Position, direction: Direction) -> Result<ScoreRecord> {
        let origin = self
            .grid()
            .word_start(pos, direction)
            .ok_or(CrosswordError::NotAWord {
                row: pos.row,
                col: pos.col,
            })?;
        self.check_word(origin, direction)
    }

    /// Check and lock every word not checked yet
    pub fn check_all(&mut self) -> Vec<ScoreRecord> {
        self.verifier.check_all(&self.puzzle, &mut self.board)
    }

    /// Check all remaining words, stop the clock, and freeze the board.
    /// Calling it again returns the same summary.
    pub fn finish(&mut self) -> GameSummary {
        if !self.finished {
            self.check_all();
            self.elapsed = self.elapsed();
            self.finished = true;
            self.board.lock_all();
            info!(
                "Finished with {} points in {}",
                self.total_score(),
                self.elapsed_string()
            );
        }
        self.summary()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            total_score: self.total_score(),
            time_secs: self.elapsed().as_secs(),
            records: self.records().to_vec(),
        }
    }
}
