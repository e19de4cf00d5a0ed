use crate::selection::ensure_distinct;
use crate::{
    derive_clues, fits, ClueList, CrosswordError, Direction, GeneratorConfig, Grid, Position,
    Result, ScoreKey, WordSpec,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A word committed to a span of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub clue: String,
    pub start: Position,
    pub direction: Direction,
}

impl Placement {
    pub fn new(word: &str, clue: &str, start: Position, direction: Direction) -> Self {
        Self {
            word: word.to_string(),
            clue: clue.to_string(),
            start,
            direction,
        }
    }

    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn row_step(&self) -> usize {
        self.direction.steps().0
    }

    pub fn col_step(&self) -> usize {
        self.direction.steps().1
    }

    /// Cell `i` is at `start + i * step`
    pub fn cells(&self) -> Vec<Position> {
        (0..self.len())
            .map(|i| self.start.advance(self.direction, i))
            .collect()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells().contains(&pos)
    }

    /// Identity of this word for scoring
    pub fn key(&self) -> ScoreKey {
        ScoreKey::new(&self.word, self.start)
    }
}

/// A finished grid together with one placement per selected word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPuzzle")]
pub struct Puzzle {
    pub grid: Grid,
    pub placements: Vec<Placement>,
}

#[derive(Deserialize)]
struct RawPuzzle {
    grid: Grid,
    placements: Vec<Placement>,
}

impl TryFrom<RawPuzzle> for Puzzle {
    type Error = CrosswordError;

    fn try_from(raw: RawPuzzle) -> Result<Self> {
        let puzzle = Self {
            grid: raw.grid,
            placements: raw.placements,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }
}

impl Puzzle {
    /// Check that every placement lies on the grid and matches its letters
    pub fn validate(&self) -> Result<()> {
        for placement in &self.placements {
            if placement.is_empty() {
                return Err(CrosswordError::malformed("placement with an empty word"));
            }
            for (pos, ch) in placement.cells().into_iter().zip(placement.word.chars()) {
                if !self.grid.contains(pos) {
                    return Err(CrosswordError::malformed(format!(
                        "{} runs off the grid at {}",
                        placement.word, pos
                    )));
                }
                if self.grid.get(pos) != Some(ch) {
                    return Err(CrosswordError::malformed(format!(
                        "{} does not match the grid at {}",
                        placement.word, pos
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number the grid and pair every run with its clue
    pub fn clues(&self) -> ClueList {
        derive_clues(&self.grid, &self.placements)
    }

    /// The placement starting at `start` running along `direction`
    pub fn placement_at(&self, start: Position, direction: Direction) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|p| p.start == start && p.direction == direction)
    }
}

/// Crossword layout generator.
///
/// Words are placed longest first. The first word goes to a random spot, each
/// following word prefers to cross a letter already on the grid and otherwise
/// takes any legal spot. When a word cannot be placed at all the whole grid is
/// thrown away and rebuilt; the number of rebuilds is bounded by the config.
pub struct Generator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config_and_seed(GeneratorConfig::default(), seed)
    }

    pub fn with_config_and_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Lay out every word on a fresh grid.
    ///
    /// Either every word is placed or an error is returned; a partially
    /// filled grid never escapes.
    pub fn generate(&mut self, words: &[WordSpec]) -> Result<Puzzle> {
        if words.is_empty() {
            return Err(CrosswordError::invalid_word("", "no words to place"));
        }
        for word in words {
            word.validate(self.config.grid_size)?;
        }
        ensure_distinct(words)?;

        // Stable, so equal-length words keep their input order
        let mut sorted: Vec<&WordSpec> = words.iter().collect();
        sorted.sort_by_key(|w| Reverse(w.len()));

        for round in 0..=self.config.regeneration_retries {
            if let Some(puzzle) = self.try_generate(&sorted) {
                return Ok(puzzle);
            }
            warn!(
                "Generation round {} failed after {} attempts",
                round + 1,
                self.config.outer_attempts
            );
        }

        Err(CrosswordError::Generation {
            attempts: self.config.total_attempts(),
        })
    }

    /// One round of up to `outer_attempts` fresh grids
    fn try_generate(&mut self, words: &[&WordSpec]) -> Option<Puzzle> {
        let (first, rest) = words.split_first()?;

        'attempt: for attempt in 0..self.config.outer_attempts {
            let mut grid = Grid::new(self.config.grid_size);
            let mut placements = Vec::with_capacity(words.len());

            let Some((start, direction)) = self.place_first(&grid, &first.answer) else {
                debug!("Attempt {}: no spot for {}", attempt + 1, first.answer);
                continue;
            };
            grid.place(&first.answer, start, direction);
            placements.push(Placement::new(&first.answer, &first.clue, start, direction));

            for word in rest {
                let spot = self
                    .place_crossing(&grid, &word.answer)
                    .or_else(|| self.place_anywhere(&grid, &word.answer));
                let Some((start, direction)) = spot else {
                    debug!("Attempt {}: no spot for {}", attempt + 1, word.answer);
                    continue 'attempt;
                };
                grid.place(&word.answer, start, direction);
                placements.push(Placement::new(&word.answer, &word.clue, start, direction));
            }

            info!(
                "Placed {} words on attempt {}",
                placements.len(),
                attempt + 1
            );
            return Some(Puzzle { grid, placements });
        }

        None
    }

    /// Random position and orientation, retried up to `first_word_tries` times
    fn place_first(&mut self, grid: &Grid, word: &str) -> Option<(Position, Direction)> {
        let n = grid.size();
        if n == 0 {
            return None;
        }
        for _ in 0..self.config.first_word_tries {
            let direction = self.random_direction();
            let row = self.rng.gen_range(0..n);
            let col = self.rng.gen_range(0..n);
            if fits(grid, word, row as isize, col as isize, direction) {
                return Some((Position::new(row, col), direction));
            }
        }
        None
    }

    /// First legal placement that crosses a letter already on the grid,
    /// visiting occupied cells in random order
    fn place_crossing(&mut self, grid: &Grid, word: &str) -> Option<(Position, Direction)> {
        let mut occupied = grid.letter_positions();
        occupied.shuffle(&mut self.rng);

        for (pos, letter) in occupied {
            for (idx, ch) in word.chars().enumerate() {
                if ch != letter {
                    continue;
                }
                for direction in Direction::ALL {
                    let (row_step, col_step) = direction.signed_steps();
                    let row = pos.row as isize - row_step * idx as isize;
                    let col = pos.col as isize - col_step * idx as isize;
                    if fits(grid, word, row, col, direction) {
                        return Some((Position::new(row as usize, col as usize), direction));
                    }
                }
            }
        }
        None
    }

    /// Uniform choice among every legal placement on the grid
    fn place_anywhere(&mut self, grid: &Grid, word: &str) -> Option<(Position, Direction)> {
        let n = grid.size();
        let mut candidates = Vec::new();
        for row in 0..n {
            for col in 0..n {
                for direction in Direction::ALL {
                    if fits(grid, word, row as isize, col as isize, direction) {
                        candidates.push((Position::new(row, col), direction));
                    }
                }
            }
        }
        let choice = candidates.choose(&mut self.rng).copied();
        if choice.is_some() {
            debug!("No crossing for {}, placed freely", word);
        }
        choice
    }

    fn random_direction(&mut self) -> Direction {
        if self.rng.gen_bool(0.5) {
            Direction::Across
        } else {
            Direction::Down
        }
    }
}
