//! Name models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::name;
use crate::error::{AppError, AppResult};

/// Gender tag of a name, also used to restrict the names offered by a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum NameGender {
    M,
    F,
}

impl NameGender {
    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }

    /// Parse the stored representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "M" => Some(Self::M),
            "F" => Some(Self::F),
            _ => None,
        }
    }

    /// Parse a stored column value belonging to row `id`.
    ///
    /// Anything but `M` or `F` means the row was written outside the API.
    pub fn from_stored(s: &str, id: Uuid) -> AppResult<Self> {
        Self::parse(s).ok_or_else(|| {
            AppError::Database(format!("Row {} has unknown gender {:?}", id, s))
        })
    }
}

impl std::fmt::Display for NameGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate name as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Name {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub value: String,
    pub gender: NameGender,
}

impl TryFrom<name::Model> for Name {
    type Error = AppError;

    fn try_from(m: name::Model) -> AppResult<Self> {
        Ok(Self {
            gender: NameGender::from_stored(&m.gender, m.id)?,
            id: m.id,
            created_at: m.created_at,
            updated_at: m.updated_at,
            value: m.value,
        })
    }
}

/// Request body for `POST /names`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateNameRequest {
    pub value: String,
    pub gender: NameGender,
}

/// Query parameters for `GET /names`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListNamesQuery {
    pub gender: Option<NameGender>,
}
