//! Create game_guests table.

use sea_orm_migration::prelude::*;

use super::m20261019_000001_create_users::Users;
use super::m20261019_000003_create_games::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameGuests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameGuests::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GameGuests::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameGuests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(GameGuests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(GameGuests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_guests_game_id")
                            .from(GameGuests::Table, GameGuests::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_guests_user_id")
                            .from(GameGuests::Table, GameGuests::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_guests_game_user")
                    .table(GameGuests::Table)
                    .col(GameGuests::GameId)
                    .col(GameGuests::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_guests_user_id")
                    .table(GameGuests::Table)
                    .col(GameGuests::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameGuests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GameGuests {
    Table,
    Id,
    GameId,
    UserId,
    CreatedAt,
    UpdatedAt,
}
