//! Database operations for users.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Entity as User};
use crate::error::{AppError, AppResult, is_foreign_key_violation, is_unique_violation};

use super::DbPool;

impl DbPool {
    /// List all users ordered by username.
    pub async fn list_users(&self) -> AppResult<Vec<user::Model>> {
        let users = User::find()
            .order_by_asc(user::Column::Username)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list users: {}", e)))?;

        Ok(users)
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: Uuid) -> AppResult<Option<user::Model>> {
        let user = User::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?;

        Ok(user)
    }

    /// Get a user by exact username.
    pub async fn find_user_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find user: {}", e)))?;

        Ok(user)
    }

    /// Insert a new user. A taken username is reported as already existing.
    pub async fn create_user(&self, username: &str) -> AppResult<user::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(self.connection()).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists("username", "this user already exists")
            } else {
                AppError::Database(format!("Failed to insert user: {}", e))
            }
        })
    }

    /// Return the user with this username, creating it on first sight.
    ///
    /// Two requests racing on a new username both end up with the same row:
    /// the loser of the insert hits the unique index and re-reads.
    pub async fn get_or_create_user(&self, username: &str) -> AppResult<user::Model> {
        if let Some(user) = self.find_user_by_username(username).await? {
            return Ok(user);
        }

        match self.create_user(username).await {
            Ok(user) => {
                debug!(user_id = %user.id, username = %user.username, "User created on first request");
                Ok(user)
            }
            Err(AppError::AlreadyExists { .. }) => self
                .find_user_by_username(username)
                .await?
                .ok_or_else(|| AppError::Database(format!("User {} vanished after conflict", username))),
            Err(e) => Err(e),
        }
    }

    /// Delete a user by ID.
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let result = User::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::InUse("User".to_string())
                } else {
                    AppError::Database(format!("Failed to delete user: {}", e))
                }
            })?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}
