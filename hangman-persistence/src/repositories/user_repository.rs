use anyhow::Result;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use hangman_types::{RankEntry, User, UserId};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_user(model: users::Model) -> User {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            total_score: model.total_score,
            games_played: model.games_played,
            average_score: model.average_score,
        }
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user_model = Users::find_by_id(id).one(&self.db).await?;
        Ok(user_model.map(Self::model_to_user))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let user_model = Users::find()
            .filter(users::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(user_model.map(Self::model_to_user))
    }

    /// Resolve a user by name, creating the row when absent. Runs on
    /// the caller's connection so game creation can ensure-user and
    /// create-game inside one transaction.
    pub async fn get_or_create<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
        email: Option<&str>,
    ) -> Result<User> {
        if let Some(existing) = Users::find()
            .filter(users::Column::Name.eq(name))
            .one(conn)
            .await?
        {
            return Ok(Self::model_to_user(existing));
        }

        let user_model = users::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.map(str::to_string)),
            total_score: ActiveValue::Set(0),
            games_played: ActiveValue::Set(0),
            average_score: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        let saved = Users::insert(user_model).exec(conn).await?;

        let created = Users::find_by_id(saved.last_insert_id)
            .one(conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("failed to retrieve created user"))?;

        Ok(Self::model_to_user(created))
    }

    /// Ledger update at game over: adds the game score to the user's
    /// total, bumps the completed-game count, and recomputes the
    /// average. Called exactly once per completed game, inside the
    /// same transaction that finalizes the game.
    pub async fn record_completed_game<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: UserId,
        game_score: i32,
    ) -> Result<()> {
        let user = Users::find_by_id(user_id)
            .one(conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("user {user_id} not found"))?;

        let total_score = user.total_score + game_score;
        let games_played = user.games_played + 1;

        let updated = users::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            name: ActiveValue::Unchanged(user.name),
            email: ActiveValue::Unchanged(user.email),
            total_score: ActiveValue::Set(total_score),
            games_played: ActiveValue::Set(games_played),
            average_score: ActiveValue::Set(f64::from(total_score) / f64::from(games_played)),
            created_at: ActiveValue::Unchanged(user.created_at),
        };

        Users::update(updated).exec(conn).await?;
        Ok(())
    }

    /// All users ordered by average score descending; ties broken by
    /// total score descending, then name ascending.
    pub async fn rankings(&self) -> Result<Vec<RankEntry>> {
        let users = Users::find()
            .order_by_desc(users::Column::AverageScore)
            .order_by_desc(users::Column::TotalScore)
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await?;

        Ok(users
            .into_iter()
            .map(|model| RankEntry {
                user_name: model.name,
                total_score: model.total_score,
                games_played: model.games_played,
                average_score: model.average_score,
            })
            .collect())
    }
}
