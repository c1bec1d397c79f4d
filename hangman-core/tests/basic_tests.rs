mod common;

use chrono::Utc;
use common::*;
use uuid::Uuid;

use hangman_core::{Level, MoveOutcome};
use hangman_types::GameStatus;

#[test]
fn test_game_creation() {
    let (game, level) = create_standard_game("cat", 6);
    assert_eq!(game.status, GameStatus::Active);
    assert_eq!(game.score, 0);
    assert_eq!(game.current_level, level.id);
    assert_eq!(level.attempts_remaining, 6);
}

#[test]
fn test_word_bank() {
    let bank = create_test_bank();
    assert_eq!(bank.len(), 3);
    assert!(bank.pick_random().is_ok());
}

#[test]
fn test_full_game_to_loss() {
    // win the first level on a word guess, lose the second on letters
    let (mut game, mut level) = create_standard_game("cat", 2);
    let outcome = game.make_move(&mut level, "cat", Utc::now()).unwrap();
    assert_eq!(outcome, MoveOutcome::LevelComplete { level_score: 2 });

    let mut next = Level::new(
        Uuid::new_v4(),
        game.id,
        2,
        create_word("dog"),
        game.attempts_allowed,
    );
    game.advance_level(next.id).unwrap();

    game.make_move(&mut next, "x", Utc::now()).unwrap();
    let outcome = game.make_move(&mut next, "y", Utc::now()).unwrap();
    assert_eq!(outcome, MoveOutcome::GameOver);

    assert_eq!(game.score, 2);
    assert_eq!(game.status, GameStatus::Completed);
    // the full move trail survives for history replay
    assert_eq!(level.moves.len() + next.moves.len(), 3);
}

#[test]
fn test_scenario_from_the_rulebook() {
    // cat/6: reveal c, miss z, then guess the word for 5 points
    let (mut game, mut level) = create_standard_game("cat", 6);

    game.make_move(&mut level, "c", Utc::now()).unwrap();
    assert_eq!(level.guessed_word(), "c__");
    assert_eq!(level.attempts_remaining, 6);

    game.make_move(&mut level, "z", Utc::now()).unwrap();
    assert_eq!(level.attempts_remaining, 5);

    let outcome = game.make_move(&mut level, "cat", Utc::now()).unwrap();
    assert_eq!(outcome, MoveOutcome::LevelComplete { level_score: 5 });
    assert!(level.complete);
    assert_eq!(game.score, 5);
}
