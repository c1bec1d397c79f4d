use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use hangman_core::{Game, Level, MoveOutcome, WordBank};
use hangman_persistence::repositories::{GameRepository, UserRepository, WordRepository};
use hangman_types::{
    GameError, GameHistory, GameId, GameSnapshot, HighScore, RankEntry, UserId, Word,
};

pub const DEFAULT_HIGH_SCORE_COUNT: i64 = 10;

/// Orchestrates one API call at a time: load the game and its current
/// level, run the core transition, and persist the result. Every
/// mutating call is a single transaction against one game, so two
/// racing guesses on the same game cannot lose updates. Cross-game
/// reads run outside transactions; stale reads are acceptable there.
pub struct GameService {
    db: DatabaseConnection,
    games: GameRepository,
    users: UserRepository,
    words: WordRepository,
    default_attempts: i32,
}

fn db_err(err: DbErr) -> GameError {
    GameError::Internal(err.into())
}

impl GameService {
    pub fn new(db: DatabaseConnection, default_attempts: i32) -> Self {
        Self {
            games: GameRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            words: WordRepository::new(db.clone()),
            db,
            default_attempts,
        }
    }

    /// Seed the word table from the given pool if it is still empty.
    pub async fn seed_words(&self, bank: &WordBank) -> Result<usize, GameError> {
        Ok(self.words.seed_if_empty(bank.words()).await?)
    }

    /// Create a game, resolving or creating the user inside the same
    /// transaction. Ensure-user and create-game must be one logical
    /// operation: split across two round trips, a fresh name could
    /// miss its own user row on a stale read.
    pub async fn new_game(
        &self,
        user_name: &str,
        email: Option<&str>,
        attempts_allowed: Option<i32>,
    ) -> Result<GameSnapshot, GameError> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(GameError::Validation(
                "user name must not be empty".to_string(),
            ));
        }
        let attempts_allowed = attempts_allowed.unwrap_or(self.default_attempts);

        let now = Utc::now();
        let txn = self.db.begin().await.map_err(db_err)?;

        let user = self.users.get_or_create(&txn, user_name, email).await?;
        let word = self.pick_word_for(&txn, user.id).await?;

        let game_id = Uuid::new_v4();
        let level_id = Uuid::new_v4();
        let game = Game::new(game_id, user.id, attempts_allowed, level_id, now)?;
        let level = Level::new(level_id, game_id, 1, word, attempts_allowed);

        self.games.insert_game(&txn, &game).await?;
        self.games.insert_level(&txn, &level).await?;
        txn.commit().await.map_err(db_err)?;

        info!(game = %game.id, user = %user.name, attempts_allowed, "new game started");
        Ok(snapshot(
            &game,
            &level,
            &user.name,
            format!("Make your move, {}!", user.name),
        ))
    }

    /// Apply one guess to a game's current level.
    pub async fn make_move(&self, key: GameId, guess: &str) -> Result<GameSnapshot, GameError> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(db_err)?;

        let mut game = self
            .games
            .find_by_id_in(&txn, key)
            .await?
            .ok_or_else(|| GameError::not_found(format!("game {key} not found")))?;
        let mut level = self
            .games
            .load_level_in(&txn, game.current_level)
            .await?
            .ok_or_else(|| GameError::not_found(format!("current level of game {key} not found")))?;

        let outcome = game.make_move(&mut level, guess, now)?;

        self.games.update_game(&txn, &game).await?;
        self.games.update_level(&txn, &level).await?;
        if outcome == MoveOutcome::GameOver {
            // ledger update rides the same transaction as the loss
            self.users
                .record_completed_game(&txn, game.user_id, game.score)
                .await?;
        }
        txn.commit().await.map_err(db_err)?;

        let user_name = self.user_name_for(game.user_id).await?;
        let message = match outcome {
            MoveOutcome::Continuing { correct: true } => "You chose well!".to_string(),
            MoveOutcome::Continuing { correct: false } => "You chose poorly!".to_string(),
            MoveOutcome::LevelComplete { .. } => "Level complete, get the next level.".to_string(),
            MoveOutcome::GameOver => format!("Game Over! You scored {}.", game.score),
        };
        Ok(snapshot(&game, &level, &user_name, message))
    }

    /// Start the next level of a game whose current level was won.
    pub async fn next_level(&self, key: GameId) -> Result<GameSnapshot, GameError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let mut game = self
            .games
            .find_by_id_in(&txn, key)
            .await?
            .ok_or_else(|| GameError::not_found(format!("game {key} not found")))?;
        let current = self
            .games
            .load_level_in(&txn, game.current_level)
            .await?
            .ok_or_else(|| GameError::not_found(format!("current level of game {key} not found")))?;

        let word = self.pick_word_for(&txn, game.user_id).await?;
        let level = Level::new(
            Uuid::new_v4(),
            game.id,
            current.number + 1,
            word,
            game.attempts_allowed,
        );
        game.advance_level(level.id)?;

        self.games.insert_level(&txn, &level).await?;
        self.games.update_game(&txn, &game).await?;
        txn.commit().await.map_err(db_err)?;

        let user_name = self.user_name_for(game.user_id).await?;
        info!(game = %game.id, level = level.number, "advanced to next level");
        Ok(snapshot(
            &game,
            &level,
            &user_name,
            format!("Make your move, {user_name}!"),
        ))
    }

    /// Delete an unfinished game and all of its levels.
    pub async fn cancel_game(&self, key: GameId) -> Result<String, GameError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let game = self
            .games
            .find_by_id_in(&txn, key)
            .await?
            .ok_or_else(|| GameError::not_found(format!("game {key} not found")))?;
        game.ensure_cancelable()?;

        self.games.delete_game(&txn, game.id).await?;
        txn.commit().await.map_err(db_err)?;

        info!(game = %game.id, "game canceled");
        Ok("Game deleted.".to_string())
    }

    pub async fn get_game(&self, key: GameId) -> Result<GameSnapshot, GameError> {
        let game = self
            .games
            .find_by_id(key)
            .await?
            .ok_or_else(|| GameError::not_found(format!("game {key} not found")))?;
        let level = self
            .games
            .load_level(game.current_level)
            .await?
            .ok_or_else(|| GameError::not_found(format!("current level of game {key} not found")))?;
        let user_name = self.user_name_for(game.user_id).await?;

        let message = if game.is_over() {
            format!("You scored {}.", game.score)
        } else if level.complete {
            "Level complete.".to_string()
        } else {
            format!("Make your move, {user_name}!")
        };
        Ok(snapshot(&game, &level, &user_name, message))
    }

    /// Ordered move log across all levels played so far, regardless of
    /// game status.
    pub async fn get_game_history(&self, key: GameId) -> Result<GameHistory, GameError> {
        let game = self
            .games
            .find_by_id(key)
            .await?
            .ok_or_else(|| GameError::not_found(format!("game {key} not found")))?;
        let user_name = self.user_name_for(game.user_id).await?;

        let levels = self.games.levels_for_game(game.id).await?;
        let moves = levels.into_iter().flat_map(|level| level.moves).collect();

        Ok(GameHistory {
            key: game.id,
            user_name,
            date: game.created_at.to_rfc3339(),
            score: game.score,
            moves,
        })
    }

    /// A user's games, active by default or completed when asked.
    pub async fn user_games(
        &self,
        user_name: &str,
        completed: bool,
    ) -> Result<Vec<GameSnapshot>, GameError> {
        let user = self
            .users
            .find_by_name(user_name)
            .await?
            .ok_or_else(|| {
                GameError::not_found(format!("a user named '{user_name}' does not exist"))
            })?;

        let games = self.games.games_for_user(user.id, completed).await?;
        let mut snapshots = Vec::with_capacity(games.len());
        for game in games {
            let level = self
                .games
                .load_level(game.current_level)
                .await?
                .ok_or_else(|| {
                    GameError::not_found(format!("current level of game {} not found", game.id))
                })?;
            snapshots.push(snapshot(&game, &level, &user.name, String::new()));
        }
        Ok(snapshots)
    }

    pub async fn rankings(&self) -> Result<Vec<RankEntry>, GameError> {
        Ok(self.users.rankings().await?)
    }

    pub async fn high_scores(&self, limit: Option<i64>) -> Result<Vec<HighScore>, GameError> {
        let limit = limit.unwrap_or(DEFAULT_HIGH_SCORE_COUNT);
        if limit <= 0 {
            return Err(GameError::Validation(
                "number of results must be positive".to_string(),
            ));
        }
        Ok(self.games.high_scores(limit as u64).await?)
    }

    async fn pick_word_for<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: UserId,
    ) -> Result<Word, GameError> {
        let pool = WordBank::new(self.words.all(conn).await?);
        let used = self.words.used_word_ids(conn, user_id).await?;
        Ok(pool.pick_random_excluding(&used)?.clone())
    }

    async fn user_name_for(&self, user_id: UserId) -> Result<String, GameError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| GameError::not_found(format!("user {user_id} not found")))?;
        Ok(user.name)
    }
}

/// Outbound state for one game and its current level. A finished game
/// shows the full word so the player can see what beat them.
fn snapshot(game: &Game, level: &Level, user_name: &str, message: impl Into<String>) -> GameSnapshot {
    let guessed_word = if game.is_over() {
        level.word.text.clone()
    } else {
        level.guessed_word()
    };

    GameSnapshot {
        key: game.id,
        attempts_remaining: level.attempts_remaining,
        game_over: game.is_over(),
        message: message.into(),
        user_name: user_name.to_string(),
        guessed_word,
        attempted_letters: level.guesses.clone(),
        clue: level.word.clue.clone(),
        date: game.created_at.to_rfc3339(),
        score: game.score,
        level_complete: level.complete,
    }
}
