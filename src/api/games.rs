//! Game API handlers.
//!
//! A game is visible to its owner and its guests only. Everyone else gets a
//! 404, so the existence of a game is never leaked. The first stage lets
//! every participant vote on candidate names; the result lists the names all
//! current participants accepted.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::RemoteUser;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    AddGuestRequest, Choice, CreateChoiceRequest, CreateGameRequest, Game, Name, UpdateGameRequest,
    User,
};

#[derive(Debug, Deserialize)]
pub struct GuestPath {
    pub game_id: Uuid,
    pub user_id: Uuid,
}

/// List the games the caller owns or is a guest of.
#[utoipa::path(
    get,
    path = "/games",
    tag = "Games",
    responses(
        (status = 200, description = "Games visible to the caller", body = Vec<Game>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn list_games(auth: RemoteUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let games = pool
        .list_games(Some(auth.user.id))
        .await?
        .into_iter()
        .map(|(game, owner)| Game::from_parts(game, owner))
        .collect::<AppResult<Vec<Game>>>()?;

    Ok(HttpResponse::Ok().json(games))
}

/// Create a game owned by the caller.
#[utoipa::path(
    post,
    path = "/games",
    tag = "Games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = Game),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid body", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn create_game(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    body: web::Json<CreateGameRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (game, owner) = pool
        .create_game(&auth.user, req.description, req.gender)
        .await?;

    Ok(HttpResponse::Created().json(Game::from_parts(game, owner)?))
}

/// Get a game by ID.
#[utoipa::path(
    get,
    path = "/games/{game_id}",
    tag = "Games",
    params(("game_id" = Uuid, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game", body = Game),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game not found or not visible", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn get_game(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let (game, owner) = pool
        .get_game(path.into_inner(), Some(auth.user.id))
        .await?;

    Ok(HttpResponse::Ok().json(Game::from_parts(game, owner)?))
}

/// Update the description and gender restriction of a game.
#[utoipa::path(
    put,
    path = "/games/{game_id}",
    tag = "Games",
    params(("game_id" = Uuid, Path, description = "Game ID")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = Game),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game not found or not visible", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid body", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn update_game(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateGameRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (game, owner) = pool
        .update_game(
            path.into_inner(),
            req.description,
            req.gender,
            Some(auth.user.id),
        )
        .await?;

    info!(game_id = %game.id, updated_by = %auth.user.username, "Game updated");

    Ok(HttpResponse::Ok().json(Game::from_parts(game, owner)?))
}

/// Delete a game with its guests and choices.
#[utoipa::path(
    delete,
    path = "/games/{game_id}",
    tag = "Games",
    params(("game_id" = Uuid, Path, description = "Game ID")),
    responses(
        (status = 204, description = "Game deleted"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game not found or not visible", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn delete_game(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    pool.delete_game(path.into_inner(), Some(auth.user.id))
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// List the guests of a game, ordered by username.
#[utoipa::path(
    get,
    path = "/games/{game_id}/guests",
    tag = "Guests",
    params(("game_id" = Uuid, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Guests", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game not found or not visible", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn list_guests(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let guests = pool
        .list_game_guests(path.into_inner(), Some(auth.user.id))
        .await?;

    Ok(HttpResponse::Ok().json(into_users(guests)))
}

/// Invite a user to a game. Returns the updated guest list.
#[utoipa::path(
    post,
    path = "/games/{game_id}/guests",
    tag = "Guests",
    params(("game_id" = Uuid, Path, description = "Game ID")),
    request_body = AddGuestRequest,
    responses(
        (status = 200, description = "Updated guests", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game or user not found", body = crate::error::ErrorResponse),
        (status = 422, description = "User is already a guest", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn add_guest(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<AddGuestRequest>,
) -> AppResult<HttpResponse> {
    let guests = pool
        .add_game_guest(path.into_inner(), body.user_id, Some(auth.user.id))
        .await?;

    Ok(HttpResponse::Ok().json(into_users(guests)))
}

/// Remove a guest from a game. Removing a non-guest is a no-op.
#[utoipa::path(
    delete,
    path = "/games/{game_id}/guests/{user_id}",
    tag = "Guests",
    params(
        ("game_id" = Uuid, Path, description = "Game ID"),
        ("user_id" = Uuid, Path, description = "Guest user ID"),
    ),
    responses(
        (status = 200, description = "Updated guests", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game not found or not visible", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn remove_guest(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<GuestPath>,
) -> AppResult<HttpResponse> {
    let GuestPath { game_id, user_id } = path.into_inner();
    let guests = pool
        .remove_game_guest(game_id, user_id, Some(auth.user.id))
        .await?;

    Ok(HttpResponse::Ok().json(into_users(guests)))
}

/// Vote on a name in the first stage.
#[utoipa::path(
    post,
    path = "/games/{game_id}/stage-1",
    tag = "First stage",
    params(("game_id" = Uuid, Path, description = "Game ID")),
    request_body = CreateChoiceRequest,
    responses(
        (status = 201, description = "Choice recorded", body = Choice),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game or name not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Name already voted on", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn create_choice(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<CreateChoiceRequest>,
) -> AppResult<HttpResponse> {
    let recorded = pool
        .record_choice(path.into_inner(), &auth.user, body.name_id, body.choice)
        .await?;

    let (game, owner) = recorded.game;
    let choice = Choice::from_parts(
        recorded.choice,
        Game::from_parts(game, owner)?,
        recorded.user,
        recorded.name,
    )?;

    Ok(HttpResponse::Created().json(choice))
}

/// Next name the caller has not voted on yet, or `null` when done.
#[utoipa::path(
    get,
    path = "/games/{game_id}/stage-1/next",
    tag = "First stage",
    params(("game_id" = Uuid, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Next name to vote on, null when none is left", body = Option<Name>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game not found or not visible", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn next_name(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let next = pool
        .next_undecided_name(path.into_inner(), auth.user.id)
        .await?
        .map(Name::try_from)
        .transpose()?;

    Ok(HttpResponse::Ok().json(next))
}

/// Names accepted by every current participant.
#[utoipa::path(
    get,
    path = "/games/{game_id}/stage-1/result",
    tag = "First stage",
    params(("game_id" = Uuid, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Unanimously accepted names, by value", body = Vec<Name>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Game not found or not visible", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn first_stage_result(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let names = pool
        .unanimous_names(path.into_inner(), Some(auth.user.id))
        .await?
        .into_iter()
        .map(Name::try_from)
        .collect::<AppResult<Vec<Name>>>()?;

    Ok(HttpResponse::Ok().json(names))
}

fn into_users(users: Vec<crate::entity::user::Model>) -> Vec<User> {
    users.into_iter().map(User::from).collect()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/games")
            .route(web::get().to(list_games))
            .route(web::post().to(create_game)),
    )
    .service(
        web::resource("/games/{game_id}")
            .route(web::get().to(get_game))
            .route(web::put().to(update_game))
            .route(web::delete().to(delete_game)),
    )
    .service(
        web::resource("/games/{game_id}/guests")
            .route(web::get().to(list_guests))
            .route(web::post().to(add_guest)),
    )
    .service(
        web::resource("/games/{game_id}/guests/{user_id}")
            .route(web::delete().to(remove_guest)),
    )
    .service(web::resource("/games/{game_id}/stage-1").route(web::post().to(create_choice)))
    .service(web::resource("/games/{game_id}/stage-1/next").route(web::get().to(next_name)))
    .service(
        web::resource("/games/{game_id}/stage-1/result").route(web::get().to(first_stage_result)),
    );
}
