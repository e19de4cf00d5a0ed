use crossword_core::CrosswordError;
use thiserror::Error;

/// Errors surfaced by the command-line tool
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Crossword(#[from] CrosswordError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

pub type AppResult<T> = Result<T, AppError>;
