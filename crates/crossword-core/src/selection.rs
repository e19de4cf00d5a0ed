//! Question pools and the word-set sampling that feeds the generator.

use crate::{CrosswordError, Result, SelectionConfig};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry of a question pool, as supplied by data loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub clue: String,
    pub answer: String,
}

impl Question {
    pub fn new(id: u32, clue: &str, answer: &str) -> Self {
        Self {
            id,
            clue: clue.to_string(),
            answer: answer.to_string(),
        }
    }
}

/// Uppercase the answer and drop all whitespace
pub fn normalize_answer(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A clue and its normalized answer, ready for placement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordSpec {
    pub clue: String,
    pub answer: String,
}

impl WordSpec {
    /// Build a word spec, normalizing the answer and rejecting anything that
    /// cannot fit on a `grid_size` grid.
    pub fn new(clue: &str, answer: &str, grid_size: usize) -> Result<Self> {
        let spec = Self {
            clue: clue.to_string(),
            answer: normalize_answer(answer),
        };
        spec.validate(grid_size)?;
        Ok(spec)
    }

    pub fn from_question(question: &Question, grid_size: usize) -> Result<Self> {
        Self::new(&question.clue, &question.answer, grid_size)
    }

    /// Number of letters in the answer
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    pub fn validate(&self, grid_size: usize) -> Result<()> {
        if self.is_empty() {
            return Err(CrosswordError::invalid_word(
                &self.answer,
                "empty after normalization",
            ));
        }
        if self.len() > grid_size {
            return Err(CrosswordError::invalid_word(
                &self.answer,
                format!("longer than the {grid_size}x{grid_size} grid"),
            ));
        }
        if let Some(ch) = self.answer.chars().find(|c| !c.is_alphanumeric()) {
            return Err(CrosswordError::invalid_word(
                &self.answer,
                format!("contains {ch:?}"),
            ));
        }
        Ok(())
    }
}

/// Reject a word set containing the same answer twice
pub(crate) fn ensure_distinct(words: &[WordSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for word in words {
        if !seen.insert(word.answer.as_str()) {
            return Err(CrosswordError::invalid_word(&word.answer, "duplicate answer"));
        }
    }
    Ok(())
}

/// The built-in question set, used when no pool is supplied or the supplied
/// one is too small
pub fn default_questions() -> Vec<Question> {
    [
        (1, "Capital of France", "PARIS"),
        (2, "Largest planet", "JUPITER"),
        (3, "Opposite of hot", "COLD"),
        (4, "Feline pet", "CAT"),
        (5, "Sound unit", "DECIBEL"),
        (6, "A small stream", "BROOK"),
        (7, "Not heavy", "LIGHT"),
        (8, "To freeze water", "ICE"),
        (9, "Used for cutting", "SCISSORS"),
        (10, "Opposite of night", "DAY"),
        (11, "A flying mammal", "BAT"),
        (12, "Computer brain", "CPU"),
        (13, "Unit of memory", "BYTE"),
        (14, "Ocean animal with eight arms", "OCTOPUS"),
        (15, "Yellow fruit", "BANANA"),
        (16, "Precious metal", "GOLD"),
        (17, "Time of day [abbr]", "AM"),
        (18, "A fast animal", "CHEETAH"),
        (19, "Bird that cannot fly", "EMU"),
        (20, "Opposite of left", "RIGHT"),
    ]
    .into_iter()
    .map(|(id, clue, answer)| Question::new(id, clue, answer))
    .collect()
}

/// An ordered collection of questions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Parse a pool from a JSON array of `{ "id", "clue", "answer" }`.
    /// An empty array is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let questions: Vec<Question> =
            serde_json::from_str(json).map_err(|e| CrosswordError::InvalidPool {
                reason: e.to_string(),
            })?;
        if questions.is_empty() {
            return Err(CrosswordError::InvalidPool {
                reason: "no questions".into(),
            });
        }
        Ok(Self::new(questions))
    }

    /// The built-in pool
    pub fn builtin() -> Self {
        Self::new(default_questions())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions whose answers are valid for `grid_size`, first occurrence of
    /// each answer only
    pub fn usable(&self, grid_size: usize) -> Vec<WordSpec> {
        let mut seen = HashSet::new();
        let mut words = Vec::new();
        for question in &self.questions {
            match WordSpec::from_question(question, grid_size) {
                Ok(spec) => {
                    if seen.insert(spec.answer.clone()) {
                        words.push(spec);
                    } else {
                        debug!("Skipping question {}: duplicate answer {}", question.id, spec.answer);
                    }
                }
                Err(e) => warn!("Skipping question {}: {}", question.id, e),
            }
        }
        words
    }
}

/// Draws a fixed-size random sample of distinct answers from a pool
pub struct WordSetSelector {
    config: SelectionConfig,
    grid_size: usize,
    rng: StdRng,
}

impl WordSetSelector {
    pub fn new(config: SelectionConfig, grid_size: usize) -> Self {
        Self {
            config,
            grid_size,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(config: SelectionConfig, grid_size: usize, seed: u64) -> Self {
        Self {
            config,
            grid_size,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Sample `words_to_pick` word specs. Falls back to the built-in pool when
    /// the given one has too few usable questions.
    pub fn select(&mut self, pool: &QuestionPool) -> Result<Vec<WordSpec>> {
        let needed = self.config.words_to_pick;
        let mut usable = pool.usable(self.grid_size);

        if usable.len() < needed && self.config.use_default_pool {
            warn!(
                "Question pool has {} usable answers, {} needed; using the built-in pool",
                usable.len(),
                needed
            );
            usable = QuestionPool::builtin().usable(self.grid_size);
        }

        if usable.len() < needed {
            return Err(CrosswordError::PoolTooSmall {
                needed,
                available: usable.len(),
            });
        }

        Ok(usable
            .choose_multiple(&mut self.rng, needed)
            .cloned()
            .collect())
    }
}
