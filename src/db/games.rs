//! Database operations for games and their guests.
//!
//! Every read or write takes an optional `viewer`. When set, only games the
//! viewer owns or is a guest of are reachable; anything else is reported as
//! not found. `None` is reserved for internal callers and tests.

use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::{game, game_first_stage, game_guest, user};
use crate::error::{AppError, AppResult, is_foreign_key_violation, is_unique_violation};
use crate::models::NameGender;

use super::DbPool;

/// A game row together with its owner row.
pub type GameWithOwner = (game::Model, user::Model);

/// Condition matching games owned by `user_id` or shared with them.
pub fn visible_to(user_id: Uuid) -> Condition {
    Condition::any()
        .add(game::Column::OwnerId.eq(user_id))
        .add(
            game::Column::Id.in_subquery(
                Query::select()
                    .column(game_guest::Column::GameId)
                    .from(game_guest::Entity)
                    .and_where(game_guest::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        )
}

fn restrict(select: Select<game::Entity>, viewer: Option<Uuid>) -> Select<game::Entity> {
    match viewer {
        Some(user_id) => select.filter(visible_to(user_id)),
        None => select,
    }
}

fn with_owner(row: (game::Model, Option<user::Model>)) -> AppResult<GameWithOwner> {
    match row {
        (game, Some(owner)) => Ok((game, owner)),
        (game, None) => Err(AppError::Database(format!(
            "Game {} references a missing owner",
            game.id
        ))),
    }
}

impl DbPool {
    /// List the games visible to `viewer`, oldest first.
    pub async fn list_games(&self, viewer: Option<Uuid>) -> AppResult<Vec<GameWithOwner>> {
        let rows = restrict(game::Entity::find(), viewer)
            .find_also_related(user::Entity)
            .order_by_asc(game::Column::CreatedAt)
            .order_by_asc(game::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list games: {}", e)))?;

        rows.into_iter().map(with_owner).collect()
    }

    /// Get a game visible to `viewer`.
    pub async fn get_game(&self, id: Uuid, viewer: Option<Uuid>) -> AppResult<GameWithOwner> {
        let row = restrict(game::Entity::find_by_id(id), viewer)
            .find_also_related(user::Entity)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get game: {}", e)))?
            .ok_or_else(|| AppError::NotFound("Game".to_string()))?;

        with_owner(row)
    }

    /// Create a game owned by `owner`.
    pub async fn create_game(
        &self,
        owner: &user::Model,
        description: Option<String>,
        gender: Option<NameGender>,
    ) -> AppResult<GameWithOwner> {
        let now = Utc::now();

        let model = game::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner.id),
            description: Set(description),
            gender: Set(gender.map(|g| g.as_str().to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let game = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert game: {}", e)))?;

        info!(game_id = %game.id, owner = %owner.username, "Game created");

        Ok((game, owner.clone()))
    }

    /// Replace the description and gender restriction of a game.
    ///
    /// Owner and guests have the same write privilege.
    pub async fn update_game(
        &self,
        id: Uuid,
        description: Option<String>,
        gender: Option<NameGender>,
        viewer: Option<Uuid>,
    ) -> AppResult<GameWithOwner> {
        let (game, owner) = self.get_game(id, viewer).await?;

        let mut active: game::ActiveModel = game.into();
        active.description = Set(description);
        active.gender = Set(gender.map(|g| g.as_str().to_string()));
        active.updated_at = Set(Utc::now());

        let game = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update game: {}", e)))?;

        Ok((game, owner))
    }

    /// Delete a game along with its guests and first stage choices.
    ///
    /// The game row is locked for the whole transaction, so a guest or choice
    /// inserted concurrently either lands before the cleanup or fails on the
    /// foreign key once the game is gone.
    pub async fn delete_game(&self, id: Uuid, viewer: Option<Uuid>) -> AppResult<()> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to start transaction: {}", e)))?;

        let game = restrict(game::Entity::find_by_id(id), viewer)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to lock game: {}", e)))?
            .ok_or_else(|| AppError::NotFound("Game".to_string()))?;

        let guests = game_guest::Entity::delete_many()
            .filter(game_guest::Column::GameId.eq(game.id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete game guests: {}", e)))?;

        let choices = game_first_stage::Entity::delete_many()
            .filter(game_first_stage::Column::GameId.eq(game.id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete game choices: {}", e)))?;

        game::Entity::delete_by_id(game.id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete game: {}", e)))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit game deletion: {}", e)))?;

        info!(
            game_id = %game.id,
            guests = guests.rows_affected,
            choices = choices.rows_affected,
            "Game deleted"
        );

        Ok(())
    }

    /// List the guests of a game, ordered by username.
    pub async fn list_game_guests(
        &self,
        game_id: Uuid,
        viewer: Option<Uuid>,
    ) -> AppResult<Vec<user::Model>> {
        self.get_game(game_id, viewer).await?;
        self.guests_of(game_id).await
    }

    async fn guests_of(&self, game_id: Uuid) -> AppResult<Vec<user::Model>> {
        let guests = user::Entity::find()
            .inner_join(game_guest::Entity)
            .filter(game_guest::Column::GameId.eq(game_id))
            .order_by_asc(user::Column::Username)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list game guests: {}", e)))?;

        Ok(guests)
    }

    /// Invite `user_id` to a game and return the updated guest list.
    pub async fn add_game_guest(
        &self,
        game_id: Uuid,
        user_id: Uuid,
        viewer: Option<Uuid>,
    ) -> AppResult<Vec<user::Model>> {
        self.get_game(game_id, viewer).await?;

        if self.get_user(user_id).await?.is_none() {
            return Err(AppError::NotFound("User".to_string()));
        }

        self.insert_guest(game_id, user_id).await?;

        info!(game_id = %game_id, user_id = %user_id, "Guest added");

        self.guests_of(game_id).await
    }

    async fn insert_guest(&self, game_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let now = Utc::now();
        let model = game_guest::ActiveModel {
            id: Set(Uuid::new_v4()),
            game_id: Set(game_id),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match model.insert(self.connection()).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AppError::already_exists(
                "user_id",
                "this guest already exists",
            )),
            Err(e) if is_foreign_key_violation(&e) => Err(self.vanished_parent(game_id, "User").await),
            Err(e) => Err(AppError::Database(format!(
                "Failed to insert game guest: {}",
                e
            ))),
        }
    }

    /// Not-found error for an insert whose parent rows were deleted after
    /// they were checked: the game if it is gone, `other` otherwise.
    pub(crate) async fn vanished_parent(&self, game_id: Uuid, other: &str) -> AppError {
        match game::Entity::find_by_id(game_id).one(self.connection()).await {
            Ok(Some(_)) => AppError::NotFound(other.to_string()),
            Ok(None) => AppError::NotFound("Game".to_string()),
            Err(e) => AppError::Database(format!("Failed to check game: {}", e)),
        }
    }

    /// Remove `user_id` from the guests of a game. Removing a non-guest is a no-op.
    pub async fn remove_game_guest(
        &self,
        game_id: Uuid,
        user_id: Uuid,
        viewer: Option<Uuid>,
    ) -> AppResult<Vec<user::Model>> {
        self.get_game(game_id, viewer).await?;

        let result = game_guest::Entity::delete_many()
            .filter(game_guest::Column::GameId.eq(game_id))
            .filter(game_guest::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete game guest: {}", e)))?;

        if result.rows_affected > 0 {
            info!(game_id = %game_id, user_id = %user_id, "Guest removed");
        }

        self.guests_of(game_id).await
    }
}
