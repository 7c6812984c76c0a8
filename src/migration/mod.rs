//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_users;
mod m20261019_000002_create_names;
mod m20261019_000003_create_games;
mod m20261019_000004_create_game_guests;
mod m20261019_000005_create_game_first_stages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_users::Migration),
            Box::new(m20261019_000002_create_names::Migration),
            Box::new(m20261019_000003_create_games::Migration),
            Box::new(m20261019_000004_create_game_guests::Migration),
            Box::new(m20261019_000005_create_game_first_stages::Migration),
        ]
    }
}
