use chrono::{DateTime, Utc};
use tracing::debug;

use hangman_types::{GameError, GameId, GameStatus, LevelId, UserId};

use crate::level::{GuessOutcome, Level};

pub const DEFAULT_ATTEMPTS_ALLOWED: i32 = 6;

/// Result of routing one guess through the current level, after the
/// game-level bookkeeping has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Continuing { correct: bool },
    /// Current level won; the game waits for an advance-level call.
    LevelComplete { level_score: i32 },
    /// Attempts exhausted; the game is over and the owning user's
    /// ledger must be updated by the caller.
    GameOver,
}

/// One game: a sequence of levels played with a fixed attempts budget.
///
/// Holds its current level by identifier only; levels hold the game
/// identifier back. Deletion cascades by lookup, never by traversal.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: GameId,
    pub user_id: UserId,
    /// Attempts budget for every level, fixed at creation.
    pub attempts_allowed: i32,
    pub status: GameStatus,
    /// Sum of completed-level scores; a lost level contributes 0.
    pub score: i32,
    pub current_level: LevelId,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(
        id: GameId,
        user_id: UserId,
        attempts_allowed: i32,
        first_level: LevelId,
        now: DateTime<Utc>,
    ) -> Result<Self, GameError> {
        if attempts_allowed <= 0 {
            return Err(GameError::Validation(
                "attempts allowed must be positive".to_string(),
            ));
        }
        Ok(Self {
            id,
            user_id,
            attempts_allowed,
            status: GameStatus::Active,
            score: 0,
            current_level: first_level,
            created_at: now,
            completed_at: None,
        })
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Route one guess to the current level and fold the outcome into
    /// the game: a won level banks its score and parks the game until
    /// the next level is requested; a lost level ends the game.
    pub fn make_move(
        &mut self,
        level: &mut Level,
        guess: &str,
        now: DateTime<Utc>,
    ) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        debug_assert_eq!(level.id, self.current_level);

        match level.apply_guess(guess, now)? {
            GuessOutcome::LevelWon { score } => {
                self.score += score;
                self.status = GameStatus::LevelComplete;
                debug!(game = %self.id, level = level.number, score, "level won");
                Ok(MoveOutcome::LevelComplete { level_score: score })
            }
            GuessOutcome::LevelLost => {
                // the failed level contributes nothing; prior wins stand
                self.status = GameStatus::Completed;
                self.completed_at = Some(now);
                debug!(game = %self.id, final_score = self.score, "game over");
                Ok(MoveOutcome::GameOver)
            }
            GuessOutcome::Continuing { correct } => Ok(MoveOutcome::Continuing { correct }),
        }
    }

    /// Swap in a freshly created level after a win. The new level must
    /// have been built with this game's attempts budget.
    pub fn advance_level(&mut self, next_level: LevelId) -> Result<(), GameError> {
        if self.status != GameStatus::LevelComplete {
            return Err(GameError::InvalidState(
                "current level is not complete".to_string(),
            ));
        }
        self.current_level = next_level;
        self.status = GameStatus::Active;
        Ok(())
    }

    /// Cancellation is only allowed while the game is still in play.
    pub fn ensure_cancelable(&self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::InvalidState(
                "completed games cannot be canceled".to_string(),
            ));
        }
        Ok(())
    }
}
