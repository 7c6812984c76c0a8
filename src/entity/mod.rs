//! SeaORM entity definitions.

pub mod game;
pub mod game_first_stage;
pub mod game_guest;
pub mod name;
pub mod user;
