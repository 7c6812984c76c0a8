//! Candidate first name entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "names")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub value: String,
    /// `M` or `F`, see `models::NameGender`.
    pub gender: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_first_stage::Entity")]
    GameFirstStage,
}

impl Related<super::game_first_stage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameFirstStage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
