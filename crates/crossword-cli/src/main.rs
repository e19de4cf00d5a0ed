mod config;
mod error;
mod logging;
mod render;

use clap::{Parser, Subcommand};
use config::{load_pool, seed_from_env, AppConfig};
use crossword_core::{ClueList, Game, Grid, PlayerBoard, Puzzle, QuestionPool, SelectionConfig};
use error::{AppError, AppResult};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// crossword: generate crossword puzzles and score filled-in answers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Path to the JSON config file [default: local data dir]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw questions from the pool and lay out a new puzzle
    Generate {
        /// Number of words to place
        #[arg(long)]
        words: Option<usize>,

        /// RNG seed for a reproducible puzzle [env: CROSSWORD_SEED]
        #[arg(long)]
        seed: Option<u64>,

        /// Question pool file (JSON array of {id, clue, answer})
        #[arg(long)]
        pool: Option<PathBuf>,

        /// Print the letters instead of a blank grid
        #[arg(long, default_value_t = false)]
        solution: bool,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Save the puzzle as JSON for a later `check`
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Score a saved puzzle against a file of player answers
    Check {
        /// Puzzle file written by `generate --out`
        #[arg(long)]
        puzzle: PathBuf,

        /// JSON array of grid rows; `.`, `#` or a space leave a cell empty
        #[arg(long)]
        answers: PathBuf,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize, Deserialize)]
struct GenerateOutput {
    puzzle: Puzzle,
    clues: ClueList,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Generate {
            words,
            seed,
            pool,
            solution,
            json,
            out,
        } => generate(config, words, seed.or_else(seed_from_env), pool, solution, json, out),
        Command::Check {
            puzzle,
            answers,
            json,
        } => check(puzzle, answers, json),
    }
}

fn generate(
    config: AppConfig,
    words: Option<usize>,
    seed: Option<u64>,
    pool: Option<PathBuf>,
    solution: bool,
    json: bool,
    out: Option<PathBuf>,
) -> AppResult<()> {
    let pool = match pool.or(config.question_pool) {
        Some(path) => load_pool(&path)?,
        None => QuestionPool::builtin(),
    };
    let selection = match words {
        Some(n) if n == 0 => return Err(AppError::Message("--words must be at least 1".into())),
        Some(n) => SelectionConfig {
            words_to_pick: n,
            ..config.selection
        },
        None => config.selection,
    };

    let game = Game::with_config(pool, config.generator, selection, seed)?;
    info!(
        "Generated a {0}x{0} puzzle with {1} words",
        game.grid().size(),
        game.puzzle().placements.len()
    );

    if let Some(path) = out {
        fs::write(&path, serde_json::to_string_pretty(game.puzzle())?)?;
        info!("Saved puzzle to {}", path.display());
    }

    if json {
        let output = GenerateOutput {
            puzzle: game.puzzle().clone(),
            clues: game.clues().clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render::render_grid(game.grid(), game.clues(), solution));
        println!();
        print!("{}", render::render_clues(game.clues()));
    }
    Ok(())
}

fn check(puzzle_path: PathBuf, answers_path: PathBuf, json: bool) -> AppResult<()> {
    let puzzle: Puzzle = serde_json::from_str(&fs::read_to_string(&puzzle_path)?)?;
    let rows: Vec<String> = serde_json::from_str(&fs::read_to_string(&answers_path)?)?;
    let answers = read_answers(&puzzle.grid, &rows)?;
    let mut game = Game::from_puzzle(puzzle);
    for (pos, _) in game.grid().letter_positions() {
        if let Some(letter) = answers.letter(pos) {
            game.set_letter(pos, letter)?;
        }
    }

    let summary = game.finish();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::render_board(game.grid(), game.board()));
        println!();
        print!("{}", render::render_summary(&summary));
    }
    Ok(())
}

/// Turn answer rows into a board; every row must span the grid exactly
fn read_answers(grid: &Grid, rows: &[String]) -> AppResult<PlayerBoard> {
    let size = grid.size();
    if rows.len() != size {
        return Err(AppError::Message(format!(
            "answers have {} rows, the grid has {}",
            rows.len(),
            size
        )));
    }
    if let Some((row, line)) = rows
        .iter()
        .enumerate()
        .find(|(_, line)| line.chars().count() != size)
    {
        return Err(AppError::Message(format!(
            "answer row {} has {} cells, the grid has {}",
            row,
            line.chars().count(),
            size
        )));
    }
    Ok(PlayerBoard::from_rows(grid, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_core::Position;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_read_answers() {
        let grid = Grid::from_rows(&["CAT", "...", "..."]).unwrap();
        let board = read_answers(&grid, &rows(&["cax", "...", "..."])).unwrap();
        assert_eq!(board.letter(Position::new(0, 2)), Some('X'));

        assert!(matches!(
            read_answers(&grid, &rows(&["CAT", "..."])),
            Err(AppError::Message(_))
        ));
        assert!(matches!(
            read_answers(&grid, &rows(&["CATS", "...", "..."])),
            Err(AppError::Message(_))
        ));
        assert!(matches!(
            read_answers(&grid, &rows(&["CAT", "..", "..."])),
            Err(AppError::Message(_))
        ));
    }
}
