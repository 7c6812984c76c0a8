//! User entity, one row per trusted-header username.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game::Entity")]
    OwnedGames,
    #[sea_orm(has_many = "super::game_guest::Entity")]
    GameGuest,
}

impl Related<super::game_guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameGuest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
