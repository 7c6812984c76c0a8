//! Create names table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Names::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Names::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Names::Value).string().not_null())
                    .col(ColumnDef::new(Names::Gender).string_len(1).not_null())
                    .col(
                        ColumnDef::new(Names::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Names::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The same spelling may exist once per gender
        manager
            .create_index(
                Index::create()
                    .name("idx_names_value_gender")
                    .table(Names::Table)
                    .col(Names::Value)
                    .col(Names::Gender)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_names_gender")
                    .table(Names::Table)
                    .col(Names::Gender)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Names::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Names {
    Table,
    Id,
    Value,
    Gender,
    CreatedAt,
    UpdatedAt,
}
