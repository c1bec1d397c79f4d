use std::collections::HashSet;

use anyhow::Result;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{games, levels, prelude::*, words};
use hangman_types::{UserId, Word, WordId};

pub struct WordRepository {
    db: DatabaseConnection,
}

impl WordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_word(model: words::Model) -> Word {
        Word {
            id: model.id,
            text: model.text,
            clue: model.clue,
        }
    }

    /// Seed the pool on first startup. Later startups see a populated
    /// table and leave it untouched, so seeding is idempotent.
    pub async fn seed_if_empty(&self, pool: &[Word]) -> Result<usize> {
        let existing = Words::find().count(&self.db).await?;
        if existing > 0 || pool.is_empty() {
            return Ok(0);
        }

        let models: Vec<words::ActiveModel> = pool
            .iter()
            .map(|word| words::ActiveModel {
                id: ActiveValue::Set(word.id),
                text: ActiveValue::Set(word.text.clone()),
                clue: ActiveValue::Set(word.clue.clone()),
            })
            .collect();

        Words::insert_many(models).exec(&self.db).await?;
        info!(count = pool.len(), "seeded word bank");
        Ok(pool.len())
    }

    /// The whole pool. Takes the caller's connection so level creation
    /// can read it inside an open transaction.
    pub async fn all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<Word>> {
        let models = Words::find().all(conn).await?;
        Ok(models.into_iter().map(Self::model_to_word).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Words::find().count(&self.db).await?)
    }

    /// Ids of every word the user has already seen, across all of
    /// their games. Used to avoid handing the same word out twice
    /// while unseen words remain.
    pub async fn used_word_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: UserId,
    ) -> Result<HashSet<WordId>> {
        let ids: Vec<Uuid> = Levels::find()
            .select_only()
            .column(levels::Column::WordId)
            .inner_join(Games)
            .filter(games::Column::UserId.eq(user_id))
            .into_tuple()
            .all(conn)
            .await?;

        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};

    fn sample_pool() -> Vec<Word> {
        ["cat", "dog"]
            .iter()
            .map(|text| Word {
                id: Uuid::new_v4(),
                text: text.to_string(),
                clue: format!("clue for {text}"),
            })
            .collect()
    }

    async fn setup_test_db() -> WordRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        WordRepository::new(db)
    }

    #[tokio::test]
    async fn test_seed_and_load() {
        let repo = setup_test_db().await;
        let pool = sample_pool();

        let seeded = repo.seed_if_empty(&pool).await.unwrap();
        assert_eq!(seeded, 2);
        assert_eq!(repo.count().await.unwrap(), 2);

        let words = repo.all(&repo.db).await.unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.iter().any(|w| w.text == "cat"));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = setup_test_db().await;
        let pool = sample_pool();

        repo.seed_if_empty(&pool).await.unwrap();
        let second = repo.seed_if_empty(&sample_pool()).await.unwrap();

        assert_eq!(second, 0);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_used_word_ids_empty_for_new_user() {
        let repo = setup_test_db().await;
        repo.seed_if_empty(&sample_pool()).await.unwrap();

        let used = repo.used_word_ids(&repo.db, Uuid::new_v4()).await.unwrap();
        assert!(used.is_empty());
    }
}
