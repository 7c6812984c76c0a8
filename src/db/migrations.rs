//! Database migration runner.

use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

use super::DbPool;

impl DbPool {
    /// Run all pending migrations.
    ///
    /// Migrations are applied in order and tracked in the `seaql_migrations` table.
    pub async fn run_migrations(&self) -> AppResult<()> {
        let pending = Migrator::get_pending_migrations(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list migrations: {}", e)))?;

        if pending.is_empty() {
            info!("No pending migrations");
            return Ok(());
        }

        info!("{} migration(s) pending", pending.len());

        Migrator::up(self.connection(), None)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;

        info!("Migrations applied successfully");
        Ok(())
    }
}
