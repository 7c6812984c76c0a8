//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::config::DEFAULT_AUTH_HEADER;
use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Prenoms",
        version = "1.0.0",
        description = "Pick a baby name together: propose names, invite guests and vote until everyone agrees"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health
        api::health::health,
        // Users
        api::me::me,
        api::users::list_users,
        api::users::create_user,
        api::users::get_user,
        api::users::delete_user,
        // Names
        api::names::list_names,
        api::names::create_name,
        api::names::get_name,
        api::names::delete_name,
        // Games
        api::games::list_games,
        api::games::create_game,
        api::games::get_game,
        api::games::update_game,
        api::games::delete_game,
        // Guests
        api::games::list_guests,
        api::games::add_guest,
        api::games::remove_guest,
        // First stage
        api::games::create_choice,
        api::games::next_name,
        api::games::first_stage_result,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            error::ErrorDetail,
            // Health
            api::health::HealthStatus,
            api::health::HealthResponse,
            // Users
            models::User,
            models::CreateUserRequest,
            // Names
            models::NameGender,
            models::Name,
            models::CreateNameRequest,
            // Games
            models::Game,
            models::CreateGameRequest,
            models::UpdateGameRequest,
            models::AddGuestRequest,
            models::CreateChoiceRequest,
            models::Choice,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "Users known to the service"),
        (name = "Names", description = "Candidate names"),
        (name = "Games", description = "Games owned by or shared with the caller"),
        (name = "Guests", description = "Game guest management"),
        (name = "First stage", description = "Voting on names and unanimous results")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Document the trusted identity header set by the fronting proxy.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "remote_user",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new(DEFAULT_AUTH_HEADER),
                    ),
                ),
            );
        }
    }
}
