use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Levels::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Levels::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Levels::GameId).string().not_null())
                    .col(ColumnDef::new(Levels::WordId).string().not_null())
                    .col(ColumnDef::new(Levels::Number).integer().not_null())
                    .col(
                        ColumnDef::new(Levels::AttemptsRemaining)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Levels::Guesses).json().not_null())
                    .col(ColumnDef::new(Levels::Moves).json().not_null())
                    .col(
                        ColumnDef::new(Levels::Complete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Levels::Won)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_levels_game_id")
                            .from(Levels::Table, Levels::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_levels_word_id")
                            .from(Levels::Table, Levels::WordId)
                            .to(Words::Table, Words::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Covers history replay, which walks a game's levels in order
        manager
            .create_index(
                Index::create()
                    .name("idx_levels_game_id_number")
                    .table(Levels::Table)
                    .col(Levels::GameId)
                    .col(Levels::Number)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Levels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Levels {
    Table,
    Id,
    GameId,
    WordId,
    Number,
    AttemptsRemaining,
    Guesses,
    Moves,
    Complete,
    Won,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Words {
    Table,
    Id,
}
