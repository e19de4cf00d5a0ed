use crate::error::AppResult;
use crossword_core::{GeneratorConfig, QuestionPool, SelectionConfig};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable that fixes the RNG seed when `--seed` is absent
pub const SEED_ENV: &str = "CROSSWORD_SEED";

/// Settings read from the JSON config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Question pool file; the built-in questions are used when unset
    pub question_pool: Option<PathBuf>,
    pub selection: SelectionConfig,
    pub generator: GeneratorConfig,
}

impl AppConfig {
    /// `crossword_config.json` in the platform's local data directory
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crossword_config.json")
    }

    /// Load the config file. A missing file means defaults; a malformed one
    /// is an error.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);
        match fs::read_to_string(&path) {
            Ok(json) => {
                info!("Loaded config from {}", path.display());
                Ok(serde_json::from_str(&json)?)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Read a seed from the environment, ignoring values that do not parse
pub fn seed_from_env() -> Option<u64> {
    parse_seed(std::env::var(SEED_ENV).ok()?.as_str())
}

fn parse_seed(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Load a question pool: a JSON array of `{ "id", "clue", "answer" }`
pub fn load_pool(path: &Path) -> AppResult<QuestionPool> {
    let pool = QuestionPool::from_json(&fs::read_to_string(path)?)?;
    info!("Loaded {} questions from {}", pool.len(), path.display());
    Ok(pool)
}
