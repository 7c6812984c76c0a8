//! User API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::RemoteUser;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, User};

/// List all users, ordered by username.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn list_users(_auth: RemoteUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let users: Vec<User> = pool
        .list_users()
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// Create a user explicitly.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 422, description = "Username taken or blank", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn create_user(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let username = body.username.trim();
    if username.is_empty() {
        return Err(AppError::validation(
            &["body", "username"],
            "username must not be empty",
        ));
    }

    let user = pool.create_user(username).await?;

    info!(user_id = %user.id, username = %user.username, created_by = %auth.user.username, "User created");

    Ok(HttpResponse::Created().json(User::from(user)))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn get_user(
    _auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = pool
        .get_user(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    Ok(HttpResponse::Ok().json(User::from(user)))
}

/// Delete a user by ID.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 422, description = "User still owns games, guest rows or choices", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn delete_user(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    pool.delete_user(user_id).await?;

    info!(user_id = %user_id, deleted_by = %auth.user.username, "User deleted");

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(list_users))
            .route(web::post().to(create_user)),
    )
    .service(
        web::resource("/users/{user_id}")
            .route(web::get().to(get_user))
            .route(web::delete().to(delete_user)),
    );
}
