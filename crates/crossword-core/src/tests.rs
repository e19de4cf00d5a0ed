//! End-to-end scenarios across generation, numbering and verification

use crate::*;
use std::collections::BTreeSet;

fn builtin_words(seed: u64) -> Vec<WordSpec> {
    WordSetSelector::with_seed(SelectionConfig::default(), DEFAULT_GRID_SIZE, seed)
        .select(&QuestionPool::builtin())
        .unwrap()
}

/// Every pair of orthogonally adjacent letters must belong to one placement
/// running in that direction
fn assert_no_illegal_adjacency(puzzle: &Puzzle) {
    for (pos, _) in puzzle.grid.letter_positions() {
        for direction in Direction::ALL {
            let next = pos.advance(direction, 1);
            if !puzzle.grid.is_letter(next) {
                continue;
            }
            let shared = puzzle
                .placements
                .iter()
                .any(|p| p.direction == direction && p.contains(pos) && p.contains(next));
            assert!(shared, "{} and {} touch without sharing a word", pos, next);
        }
    }
}

fn assert_crossings_agree(puzzle: &Puzzle) {
    for a in &puzzle.placements {
        for b in &puzzle.placements {
            for (pos, ch) in a.cells().into_iter().zip(a.word.chars()) {
                if let Some(i) = b.cells().iter().position(|&p| p == pos) {
                    assert_eq!(b.word.chars().nth(i), Some(ch));
                }
            }
        }
    }
}

#[test]
fn test_generated_puzzles_are_legal() {
    for seed in 0..20 {
        let words = builtin_words(seed);
        let puzzle = Generator::with_seed(seed).generate(&words).unwrap();
        assert_eq!(puzzle.placements.len(), words.len());
        assert_crossings_agree(&puzzle);
        assert_no_illegal_adjacency(&puzzle);
    }
}

#[test]
fn test_numbering_recovers_placed_words() {
    for seed in 0..20 {
        let puzzle = Generator::with_seed(seed)
            .generate(&builtin_words(seed))
            .unwrap();
        let clues = puzzle.clues();

        let decoded: BTreeSet<(String, Position, Direction)> = clues
            .iter()
            .map(|e| (e.word.clone(), e.start, e.direction))
            .collect();
        let placed: BTreeSet<(String, Position, Direction)> = puzzle
            .placements
            .iter()
            .map(|p| (p.word.clone(), p.start, p.direction))
            .collect();
        assert_eq!(decoded, placed);

        for entry in clues.iter() {
            let placement = puzzle.placement_at(entry.start, entry.direction).unwrap();
            assert_eq!(entry.clue, placement.clue);
        }

        // Numbers follow row-major order of start cells
        let mut starts: Vec<(u32, Position)> = clues.iter().map(|e| (e.number, e.start)).collect();
        starts.sort();
        starts.dedup();
        assert!(starts.windows(2).all(|w| w[0].1 < w[1].1));
        assert_eq!(starts.first().map(|s| s.0), Some(1));
        assert!(starts.windows(2).all(|w| w[1].0 == w[0].0 + 1));
    }
}

#[test]
fn test_generation_terminates_with_failure() {
    let config = GeneratorConfig {
        grid_size: 3,
        outer_attempts: 5,
        first_word_tries: 5,
        regeneration_retries: 2,
    };
    let words: Vec<WordSpec> = ["ABC", "DEF", "GHI"]
        .iter()
        .map(|a| WordSpec::new("clue", a, 3).unwrap())
        .collect();
    let result = Generator::with_config_and_seed(config, 9).generate(&words);
    assert_eq!(result, Err(CrosswordError::Generation { attempts: 15 }));
}

#[test]
fn test_paris_scenario() {
    let words = vec![WordSpec::new("Capital of France", "Paris", 5).unwrap()];
    let puzzle = Generator::with_config_and_seed(GeneratorConfig::with_grid_size(5), 21)
        .generate(&words)
        .unwrap();
    assert!(puzzle.placements[0]
        .cells()
        .iter()
        .all(|&p| puzzle.grid.contains(p)));

    let clues = derive_clues(&puzzle.grid, &puzzle.placements);
    assert_eq!(clues.len(), 1);
    let entry = clues.iter().next().unwrap();
    assert_eq!(entry.number, 1);
    assert_eq!(entry.word, "PARIS");
    assert_eq!(entry.clue, "Capital of France");
}

fn type_solution(game: &mut Game) {
    let placements = game.puzzle().placements.clone();
    for placement in placements {
        for (pos, ch) in placement.cells().into_iter().zip(placement.word.chars()) {
            game.set_letter(pos, ch.to_ascii_lowercase()).unwrap();
        }
    }
}

#[test]
fn test_perfect_game() {
    let mut game = Game::with_seed(QuestionPool::builtin(), 5).unwrap();
    type_solution(&mut game);
    let summary = game.finish();
    assert_eq!(summary.records.len(), 7);
    assert_eq!(summary.total_score, 7 * 25);
    assert_eq!(summary.max_score(), summary.total_score);
    assert!(game.is_finished());
}

#[test]
fn test_check_word_then_finish() {
    let mut game = Game::with_seed(QuestionPool::builtin(), 8).unwrap();
    let first = game.puzzle().placements[0].clone();
    let cells = first.cells();

    // Everything right except the last letter
    for (i, (&pos, ch)) in cells.iter().zip(first.word.chars()).enumerate() {
        let typed = if i + 1 == cells.len() { '?' } else { ch };
        game.set_letter(pos, typed).unwrap();
    }

    // Check through a middle cell of the word
    let record = game.check_word_at(cells[1], first.direction).unwrap();
    assert_eq!(record.key, first.key());
    assert_eq!(record.wrong_count, 1);
    assert_eq!(record.score, 18);
    assert_eq!(game.board().letter(cells[cells.len() - 1]), Some('?'));
    assert_eq!(
        game.set_letter(cells[0], 'Z'),
        Err(CrosswordError::CellLocked {
            row: cells[0].row,
            col: cells[0].col
        })
    );

    assert!(matches!(
        game.check_word(first.start, first.direction),
        Err(CrosswordError::AlreadyLocked { .. })
    ));
    assert_eq!(game.total_score(), 18);

    // The rest is blank, so every other word is scored from its length
    let summary = game.finish();
    assert_eq!(summary.records.len(), 7);
    let expected: u32 = 18
        + game.puzzle().placements[1..]
            .iter()
            .map(|p| {
                // Crossing letters typed for the first word may be right
                let wrong = p
                    .cells()
                    .iter()
                    .zip(p.word.chars())
                    .filter(|&(&pos, ch)| game.board().letter(pos) != Some(ch))
                    .count();
                score_for_wrong_count(wrong)
            })
            .sum::<u32>();
    assert_eq!(summary.total_score, expected);

    // Finishing twice does not rescore
    assert_eq!(game.finish(), summary);
}

#[test]
fn test_input_rejected_after_finish() {
    let mut game = Game::with_seed(QuestionPool::builtin(), 13).unwrap();
    game.finish();
    let pos = game.puzzle().placements[0].start;
    assert!(game.set_letter(pos, 'A').is_err());
    assert!(game.clear_cell(pos).is_err());
}

#[test]
fn test_active_word_and_jump() {
    let mut grid = Grid::new(6);
    let placements = vec![
        Placement::new("CAT", "Feline pet", Position::new(1, 0), Direction::Across),
        Placement::new("BAT", "A flying mammal", Position::new(0, 1), Direction::Down),
    ];
    for p in &placements {
        grid.place(&p.word, p.start, p.direction);
    }
    let game = Game::from_puzzle(Puzzle { grid, placements });

    let crossing = Position::new(1, 1);
    let (direction, cells) = game.active_word(crossing, None).unwrap();
    assert_eq!(direction, Direction::Across);
    assert_eq!(cells.len(), 3);

    let (direction, cells) = game.active_word(crossing, Some(Direction::Down)).unwrap();
    assert_eq!(direction, Direction::Down);
    assert_eq!(cells[0], Position::new(0, 1));

    // The C only belongs to an across word
    let (direction, _) = game
        .active_word(Position::new(1, 0), Some(Direction::Down))
        .unwrap();
    assert_eq!(direction, Direction::Across);
    assert!(game.active_word(Position::new(4, 4), None).is_none());

    // BAT starts at (0, 1) -> 1 Down, CAT at (1, 0) -> 2 Across
    assert_eq!(
        game.jump_to(1, Direction::Down),
        Some(vec![Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)])
    );
    assert_eq!(game.jump_to(2, Direction::Across).map(|c| c.len()), Some(3));
    assert!(game.jump_to(3, Direction::Across).is_none());
}

#[test]
fn test_new_puzzle_resets_state() {
    let mut game = Game::with_seed(QuestionPool::builtin(), 17).unwrap();
    type_solution(&mut game);
    game.finish();
    game.new_puzzle().unwrap();
    assert!(!game.is_finished());
    assert_eq!(game.total_score(), 0);
    assert!(game.records().is_empty());
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.puzzle().placements.len(), 7);
}

#[test]
fn test_puzzle_json_round_trip() {
    let puzzle = Generator::with_seed(4).generate(&builtin_words(4)).unwrap();
    let json = serde_json::to_string(&puzzle).unwrap();
    let restored: Puzzle = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.clues(), puzzle.clues());
}
