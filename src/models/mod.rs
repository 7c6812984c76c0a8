//! Domain models and request/response types for the Prenoms API.

pub mod game;
pub mod name;
pub mod user;

// Re-export commonly used types
pub use game::{
    AddGuestRequest, Choice, CreateChoiceRequest, CreateGameRequest, Game, UpdateGameRequest,
};
pub use name::{CreateNameRequest, ListNamesQuery, Name, NameGender};
pub use user::{CreateUserRequest, User};
