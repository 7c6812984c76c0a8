//! Create game_first_stages table (first stage votes).

use sea_orm_migration::prelude::*;

use super::m20261019_000001_create_users::Users;
use super::m20261019_000002_create_names::Names;
use super::m20261019_000003_create_games::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameFirstStages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameFirstStages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameFirstStages::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameFirstStages::UserId).uuid().not_null())
                    .col(ColumnDef::new(GameFirstStages::NameId).uuid().not_null())
                    .col(ColumnDef::new(GameFirstStages::Choice).boolean().not_null())
                    .col(
                        ColumnDef::new(GameFirstStages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(GameFirstStages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_first_stages_game_id")
                            .from(GameFirstStages::Table, GameFirstStages::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_first_stages_user_id")
                            .from(GameFirstStages::Table, GameFirstStages::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_first_stages_name_id")
                            .from(GameFirstStages::Table, GameFirstStages::NameId)
                            .to(Names::Table, Names::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One vote per user per name per game
        manager
            .create_index(
                Index::create()
                    .name("idx_game_first_stages_user_choice")
                    .table(GameFirstStages::Table)
                    .col(GameFirstStages::GameId)
                    .col(GameFirstStages::UserId)
                    .col(GameFirstStages::NameId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_first_stages_game_choice")
                    .table(GameFirstStages::Table)
                    .col(GameFirstStages::GameId)
                    .col(GameFirstStages::Choice)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_first_stages_name_id")
                    .table(GameFirstStages::Table)
                    .col(GameFirstStages::NameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameFirstStages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GameFirstStages {
    Table,
    Id,
    GameId,
    UserId,
    NameId,
    Choice,
    CreatedAt,
    UpdatedAt,
}
