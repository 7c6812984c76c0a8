//! Database operations for the first stage of a game: votes, next name, result.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::sea_query::{self, Expr, Func, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::{game_first_stage, game_guest, name, user};
use crate::error::{AppError, AppResult, is_foreign_key_violation, is_unique_violation};

use super::DbPool;
use super::games::GameWithOwner;

/// A stored choice with the rows it points to.
#[derive(Debug, Clone)]
pub struct RecordedChoice {
    pub choice: game_first_stage::Model,
    pub game: GameWithOwner,
    pub user: user::Model,
    pub name: name::Model,
}

impl DbPool {
    /// Record `user`'s vote on a name in a game.
    ///
    /// Votes are final: a second vote on the same name in the same game is
    /// rejected. The game's gender restriction is not checked here.
    pub async fn record_choice(
        &self,
        game_id: Uuid,
        user: &user::Model,
        name_id: Uuid,
        choice: bool,
    ) -> AppResult<RecordedChoice> {
        let game = self.get_game(game_id, Some(user.id)).await?;

        let name = self
            .get_name(name_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Name".to_string()))?;

        let now = Utc::now();
        let model = game_first_stage::ActiveModel {
            id: Set(Uuid::new_v4()),
            game_id: Set(game_id),
            user_id: Set(user.id),
            name_id: Set(name_id),
            choice: Set(choice),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let row = match model.insert(self.connection()).await {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                return Err(AppError::already_exists(
                    "name_id",
                    "this choice already exists",
                ));
            }
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(self.vanished_parent(game_id, "Name").await);
            }
            Err(e) => return Err(AppError::Database(format!("Failed to insert choice: {}", e))),
        };

        debug!(game_id = %game_id, user_id = %user.id, name_id = %name_id, choice, "Choice recorded");

        Ok(RecordedChoice {
            choice: row,
            game,
            user: user.clone(),
            name,
        })
    }

    /// Pick a name `user_id` has not voted on yet in this game.
    ///
    /// Honors the game's gender restriction. Returns `None` once every
    /// eligible name has been voted on.
    pub async fn next_undecided_name(
        &self,
        game_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<name::Model>> {
        let (game, _) = self.get_game(game_id, Some(user_id)).await?;

        let already_voted = Query::select()
            .column(game_first_stage::Column::NameId)
            .from(game_first_stage::Entity)
            .and_where(game_first_stage::Column::GameId.eq(game.id))
            .and_where(game_first_stage::Column::UserId.eq(user_id))
            .to_owned();

        let mut select = name::Entity::find().filter(name::Column::Id.not_in_subquery(already_voted));

        if let Some(ref gender) = game.gender {
            select = select.filter(name::Column::Gender.eq(gender.as_str()));
        }

        let next = select
            .order_by_asc(name::Column::Value)
            .order_by_asc(name::Column::Id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to pick next name: {}", e)))?;

        Ok(next)
    }

    /// Names every current participant of the game voted `true` on, by value.
    ///
    /// Participants are the owner plus the current guests, counted at read
    /// time. Votes left behind by removed guests are ignored, so removing a
    /// guest can only grow the result.
    pub async fn unanimous_names(
        &self,
        game_id: Uuid,
        viewer: Option<Uuid>,
    ) -> AppResult<Vec<name::Model>> {
        let (game, _) = self.get_game(game_id, viewer).await?;

        let guest_ids: Vec<Uuid> = game_guest::Entity::find()
            .select_only()
            .column(game_guest::Column::UserId)
            .filter(game_guest::Column::GameId.eq(game.id))
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list participants: {}", e)))?;

        let participants: HashSet<Uuid> = std::iter::once(game.owner_id)
            .chain(guest_ids)
            .collect();

        // Names with a yes from every participant, counted in one grouped query
        let unanimous = Query::select()
            .column(game_first_stage::Column::NameId)
            .from(game_first_stage::Entity)
            .and_where(game_first_stage::Column::GameId.eq(game.id))
            .and_where(game_first_stage::Column::Choice.eq(true))
            .and_where(game_first_stage::Column::UserId.is_in(participants.iter().copied()))
            .group_by_col(game_first_stage::Column::NameId)
            .and_having(sea_query::ExprTrait::eq(
                Expr::expr(Func::count_distinct(Expr::col(
                    game_first_stage::Column::UserId,
                ))),
                participants.len() as i64,
            ))
            .to_owned();

        let names = name::Entity::find()
            .filter(name::Column::Id.in_subquery(unanimous))
            .order_by_asc(name::Column::Value)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load matched names: {}", e)))?;

        debug!(
            game_id = %game.id,
            participants = participants.len(),
            matched = names.len(),
            "Computed unanimous names"
        );

        Ok(names)
    }
}
