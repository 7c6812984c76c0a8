//! Game, guest and first stage models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Name, NameGender, User};
use crate::entity::{game, game_first_stage, name, user};
use crate::error::AppResult;

/// Game as returned by the API, with its owner embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Game {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub description: Option<String>,
    pub gender: Option<NameGender>,
    pub owner: User,
}

impl Game {
    /// Build the response from a game row and its owner row.
    pub fn from_parts(game: game::Model, owner: user::Model) -> AppResult<Self> {
        let gender = game
            .gender
            .as_deref()
            .map(|g| NameGender::from_stored(g, game.id))
            .transpose()?;

        Ok(Self {
            id: game.id,
            created_at: game.created_at,
            updated_at: game.updated_at,
            description: game.description,
            gender,
            owner: owner.into(),
        })
    }
}

/// Request body for `POST /games`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub gender: Option<NameGender>,
}

/// Request body for `PUT /games/{game_id}`. Both fields are replaced.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateGameRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub gender: Option<NameGender>,
}

/// Request body for `POST /games/{game_id}/guests`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddGuestRequest {
    pub user_id: Uuid,
}

/// Request body for `POST /games/{game_id}/stage-1`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateChoiceRequest {
    pub name_id: Uuid,
    pub choice: bool,
}

/// A recorded first stage choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Choice {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub game: Game,
    pub user: User,
    pub name: Name,
    pub choice: bool,
}

impl Choice {
    pub fn from_parts(
        row: game_first_stage::Model,
        game: Game,
        user: user::Model,
        name: name::Model,
    ) -> AppResult<Self> {
        Ok(Self {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            game,
            user: user.into(),
            name: Name::try_from(name)?,
            choice: row.choice,
        })
    }
}
