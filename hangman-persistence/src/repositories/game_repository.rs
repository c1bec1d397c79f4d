use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::entities::{games, levels, prelude::*, words};
use hangman_core::{Game, Level};
use hangman_types::{GameId, GameStatus, HighScore, LevelId, UserId};

const STATUS_ACTIVE: &str = "active";
const STATUS_LEVEL_COMPLETE: &str = "level_complete";
const STATUS_COMPLETED: &str = "completed";

fn status_to_db(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Active => STATUS_ACTIVE,
        GameStatus::LevelComplete => STATUS_LEVEL_COMPLETE,
        GameStatus::Completed => STATUS_COMPLETED,
    }
}

fn status_from_db(raw: &str) -> Result<GameStatus> {
    match raw {
        STATUS_ACTIVE => Ok(GameStatus::Active),
        STATUS_LEVEL_COMPLETE => Ok(GameStatus::LevelComplete),
        STATUS_COMPLETED => Ok(GameStatus::Completed),
        other => bail!("unknown game status '{other}'"),
    }
}

pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_game(model: games::Model) -> Result<Game> {
        Ok(Game {
            id: model.id,
            user_id: model.user_id,
            attempts_allowed: model.attempts_allowed,
            status: status_from_db(&model.status)?,
            score: model.score,
            current_level: model.current_level,
            created_at: model.created_at.with_timezone(&Utc),
            completed_at: model.completed_at.map(|t| t.with_timezone(&Utc)),
        })
    }

    fn game_to_active(game: &Game) -> games::ActiveModel {
        games::ActiveModel {
            id: ActiveValue::Set(game.id),
            user_id: ActiveValue::Set(game.user_id),
            attempts_allowed: ActiveValue::Set(game.attempts_allowed),
            status: ActiveValue::Set(status_to_db(game.status).to_string()),
            score: ActiveValue::Set(game.score),
            current_level: ActiveValue::Set(game.current_level),
            created_at: ActiveValue::Set(game.created_at.into()),
            completed_at: ActiveValue::Set(game.completed_at.map(Into::into)),
        }
    }

    fn models_to_level(model: levels::Model, word: words::Model) -> Level {
        Level {
            id: model.id,
            game_id: model.game_id,
            number: model.number,
            word: hangman_types::Word {
                id: word.id,
                text: word.text,
                clue: word.clue,
            },
            attempts_remaining: model.attempts_remaining,
            guesses: model.guesses.0,
            moves: model.moves.0,
            complete: model.complete,
            won: model.won,
        }
    }

    fn level_to_active(level: &Level) -> levels::ActiveModel {
        levels::ActiveModel {
            id: ActiveValue::Set(level.id),
            game_id: ActiveValue::Set(level.game_id),
            word_id: ActiveValue::Set(level.word.id),
            number: ActiveValue::Set(level.number),
            attempts_remaining: ActiveValue::Set(level.attempts_remaining),
            guesses: ActiveValue::Set(levels::GuessList(level.guesses.clone())),
            moves: ActiveValue::Set(levels::MoveLog(level.moves.clone())),
            complete: ActiveValue::Set(level.complete),
            won: ActiveValue::Set(level.won),
        }
    }

    pub async fn insert_game<C: ConnectionTrait>(&self, conn: &C, game: &Game) -> Result<()> {
        Games::insert(Self::game_to_active(game)).exec(conn).await?;
        Ok(())
    }

    pub async fn insert_level<C: ConnectionTrait>(&self, conn: &C, level: &Level) -> Result<()> {
        Levels::insert(Self::level_to_active(level))
            .exec(conn)
            .await?;
        Ok(())
    }

    pub async fn update_game<C: ConnectionTrait>(&self, conn: &C, game: &Game) -> Result<()> {
        Games::update(Self::game_to_active(game)).exec(conn).await?;
        Ok(())
    }

    pub async fn update_level<C: ConnectionTrait>(&self, conn: &C, level: &Level) -> Result<()> {
        Levels::update(Self::level_to_active(level))
            .exec(conn)
            .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: GameId) -> Result<Option<Game>> {
        self.find_by_id_in(&self.db, id).await
    }

    pub async fn find_by_id_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: GameId,
    ) -> Result<Option<Game>> {
        let model = Games::find_by_id(id).one(conn).await?;
        model.map(Self::model_to_game).transpose()
    }

    pub async fn load_level(&self, id: LevelId) -> Result<Option<Level>> {
        self.load_level_in(&self.db, id).await
    }

    pub async fn load_level_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: LevelId,
    ) -> Result<Option<Level>> {
        let row = Levels::find_by_id(id)
            .find_also_related(Words)
            .one(conn)
            .await?;

        match row {
            Some((level, Some(word))) => Ok(Some(Self::models_to_level(level, word))),
            Some((level, None)) => bail!("level {} references a missing word", level.id),
            None => Ok(None),
        }
    }

    /// A game's levels in play order, for history replay.
    pub async fn levels_for_game(&self, game_id: GameId) -> Result<Vec<Level>> {
        let rows = Levels::find()
            .filter(levels::Column::GameId.eq(game_id))
            .order_by_asc(levels::Column::Number)
            .find_also_related(Words)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(level, word)| {
                let word =
                    word.ok_or_else(|| anyhow!("level {} references a missing word", level.id))?;
                Ok(Self::models_to_level(level, word))
            })
            .collect()
    }

    /// Directory listing: a user's games filtered by completion.
    pub async fn games_for_user(&self, user_id: UserId, completed: bool) -> Result<Vec<Game>> {
        let query = Games::find().filter(games::Column::UserId.eq(user_id));
        let query = if completed {
            query.filter(games::Column::Status.eq(STATUS_COMPLETED))
        } else {
            query.filter(games::Column::Status.ne(STATUS_COMPLETED))
        };

        query
            .all(&self.db)
            .await?
            .into_iter()
            .map(Self::model_to_game)
            .collect()
    }

    /// Delete a game and cascade to its levels by identifier lookup.
    pub async fn delete_game<C: ConnectionTrait>(&self, conn: &C, game_id: GameId) -> Result<()> {
        Levels::delete_many()
            .filter(levels::Column::GameId.eq(game_id))
            .exec(conn)
            .await?;
        Games::delete_by_id(game_id).exec(conn).await?;
        Ok(())
    }

    /// Top individual completed-game scores across all users, ordered
    /// descending; ties go to the earlier completion.
    pub async fn high_scores(&self, limit: u64) -> Result<Vec<HighScore>> {
        let rows = Games::find()
            .filter(games::Column::Status.eq(STATUS_COMPLETED))
            .order_by_desc(games::Column::Score)
            .order_by_asc(games::Column::CompletedAt)
            .limit(limit)
            .find_also_related(Users)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(game, user)| {
                let user = user.ok_or_else(|| anyhow!("game {} has no owner", game.id))?;
                Ok(HighScore {
                    user_name: user.name,
                    score: game.score,
                    date: game.completed_at.unwrap_or(game.created_at).to_rfc3339(),
                })
            })
            .collect()
    }
}
