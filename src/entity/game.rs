//! Game entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub description: Option<String>,
    /// Restricts offered names to one gender when set.
    pub gender: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::game_guest::Entity")]
    GameGuest,
    #[sea_orm(has_many = "super::game_first_stage::Entity")]
    GameFirstStage,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::game_guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameGuest.def()
    }
}

impl Related<super::game_first_stage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameFirstStage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
