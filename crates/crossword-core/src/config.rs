use serde::{Deserialize, Serialize};

/// Side length of the square grid
pub const DEFAULT_GRID_SIZE: usize = 16;

/// Number of questions drawn for each puzzle
pub const DEFAULT_WORDS_TO_PICK: usize = 7;

/// Configuration for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Side length of the grid
    pub grid_size: usize,
    /// Fresh-grid attempts per generation round
    pub outer_attempts: usize,
    /// Random tries for placing the first (longest) word
    pub first_word_tries: usize,
    /// Extra generation rounds after the first one fails
    pub regeneration_retries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            outer_attempts: 200,
            first_word_tries: 200,
            regeneration_retries: 5,
        }
    }
}

impl GeneratorConfig {
    pub fn with_grid_size(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Upper bound on fresh grids built before giving up
    pub fn total_attempts(&self) -> usize {
        (self.regeneration_retries + 1) * self.outer_attempts
    }
}

/// Configuration for drawing a word set from a question pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub words_to_pick: usize,
    /// Fall back to the built-in questions when the supplied pool is too small
    pub use_default_pool: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            words_to_pick: DEFAULT_WORDS_TO_PICK,
            use_default_pool: true,
        }
    }
}

impl SelectionConfig {
    pub fn picking(words_to_pick: usize) -> Self {
        Self {
            words_to_pick,
            ..Self::default()
        }
    }
}
