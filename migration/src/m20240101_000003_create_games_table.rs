use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Games::UserId).string().not_null())
                    .col(ColumnDef::new(Games::AttemptsAllowed).integer().not_null())
                    .col(ColumnDef::new(Games::Status).string().not_null())
                    .col(
                        ColumnDef::new(Games::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    // plain column, not a foreign key: levels point back at
                    // games, so the pair is inserted game-first
                    .col(ColumnDef::new(Games::CurrentLevel).string().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Games::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_user_id")
                            .from(Games::Table, Games::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Covers the by-owner and by-status directory listings
        manager
            .create_index(
                Index::create()
                    .name("idx_games_user_id_status")
                    .table(Games::Table)
                    .col(Games::UserId)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        // Covers the high-score scan over completed games
        manager
            .create_index(
                Index::create()
                    .name("idx_games_status_score")
                    .table(Games::Table)
                    .col(Games::Status)
                    .col(Games::Score)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    UserId,
    AttemptsAllowed,
    Status,
    Score,
    CurrentLevel,
    CreatedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
