use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    /// Game in progress, current level accepting guesses.
    Active,
    /// Current level won, waiting for a next-level call.
    LevelComplete,
    /// Terminal: attempts exhausted on a level.
    Completed,
}

/// Outbound game state, returned by every game operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSnapshot {
    pub key: GameId,
    pub attempts_remaining: i32,
    pub game_over: bool,
    pub message: String,
    pub user_name: String,
    pub guessed_word: String,
    /// Letters and whole-word guesses attempted on the current level.
    pub attempted_letters: Vec<String>,
    pub clue: String,
    pub date: String, // ISO 8601 string
    pub score: i32,
    pub level_complete: bool,
}

/// One applied guess, kept for history replay. Only valid guesses are
/// recorded; rejected guesses never reach the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MoveRecord {
    pub level_number: i32,
    pub guess: String,
    pub correct: bool,
    /// Display state right after this guess was applied.
    pub guessed_word: String,
    pub attempts_remaining: i32,
    pub timestamp: String, // ISO 8601 string
}

/// Ordered move log across all levels of a game, plus game metadata.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameHistory {
    pub key: GameId,
    pub user_name: String,
    pub date: String,
    pub score: i32,
    pub moves: Vec<MoveRecord>,
}
