//! Database operations for candidate names.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::name::{self, ActiveModel, Entity as Name};
use crate::error::{AppError, AppResult, is_foreign_key_violation, is_unique_violation};
use crate::models::NameGender;

use super::DbPool;

impl DbPool {
    /// List names ordered by value, optionally restricted to one gender.
    pub async fn list_names(&self, gender: Option<NameGender>) -> AppResult<Vec<name::Model>> {
        let mut select = Name::find();

        if let Some(gender) = gender {
            select = select.filter(name::Column::Gender.eq(gender.as_str()));
        }

        let names = select
            .order_by_asc(name::Column::Value)
            .order_by_asc(name::Column::Gender)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list names: {}", e)))?;

        Ok(names)
    }

    /// Get a name by ID.
    pub async fn get_name(&self, id: Uuid) -> AppResult<Option<name::Model>> {
        let name = Name::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get name: {}", e)))?;

        Ok(name)
    }

    /// Insert a new name. The (value, gender) pair must be unused.
    pub async fn create_name(&self, value: &str, gender: NameGender) -> AppResult<name::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            value: Set(value.to_string()),
            gender: Set(gender.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(self.connection()).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists("value", "this name already exists")
            } else {
                AppError::Database(format!("Failed to insert name: {}", e))
            }
        })
    }

    /// Delete a name by ID.
    pub async fn delete_name(&self, id: Uuid) -> AppResult<()> {
        let result = Name::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::InUse("Name".to_string())
                } else {
                    AppError::Database(format!("Failed to delete name: {}", e))
                }
            })?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Name".to_string()));
        }

        Ok(())
    }
}
