use thiserror::Error;

/// Result type for crossword operations
pub type Result<T> = std::result::Result<T, CrosswordError>;

/// Errors raised by the crossword engine. None of them are fatal: callers can
/// retry generation, ignore a redundant check, or re-sample the word set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrosswordError {
    /// No legal layout was found after every retry was exhausted
    #[error("could not place every word after {attempts} attempts")]
    Generation { attempts: usize },

    /// The word has already been checked and its score is final
    #[error("{word} at ({row}, {col}) has already been checked and locked")]
    AlreadyLocked { word: String, row: usize, col: usize },

    /// The answer cannot be placed on the grid
    #[error("invalid answer {answer:?}: {reason}")]
    InvalidWordSpec { answer: String, reason: String },

    /// No placed word starts at the requested cell in the requested direction
    #[error("no word starts at ({row}, {col}) in that direction")]
    NotAWord { row: usize, col: usize },

    /// Letter entry into a cell that has been locked by a check
    #[error("cell ({row}, {col}) is locked")]
    CellLocked { row: usize, col: usize },

    /// Letter entry into a block or off-grid cell
    #[error("cell ({row}, {col}) is not part of any word")]
    BlockCell { row: usize, col: usize },

    /// Not enough distinct usable questions to build a puzzle
    #[error("need {needed} distinct questions but only {available} are usable")]
    PoolTooSmall { needed: usize, available: usize },

    /// A question pool could not be read
    #[error("invalid question pool: {reason}")]
    InvalidPool { reason: String },

    /// A saved grid or puzzle does not describe a consistent layout
    #[error("malformed puzzle: {reason}")]
    MalformedPuzzle { reason: String },
}

impl CrosswordError {
    pub(crate) fn invalid_word(answer: &str, reason: impl Into<String>) -> Self {
        Self::InvalidWordSpec {
            answer: answer.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPuzzle {
            reason: reason.into(),
        }
    }

    /// True for errors the UI should surface as a gentle notice rather than a failure
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            Self::AlreadyLocked { .. } | Self::CellLocked { .. } | Self::BlockCell { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CrosswordError::AlreadyLocked {
            word: "CAT".into(),
            row: 2,
            col: 3,
        };
        assert_eq!(err.to_string(), "CAT at (2, 3) has already been checked and locked");
        assert!(err.is_notice());

        let err = CrosswordError::invalid_word("", "empty after normalization");
        assert_eq!(err.to_string(), "invalid answer \"\": empty after normalization");
        assert!(!err.is_notice());
    }
}
