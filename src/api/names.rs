//! Name API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::RemoteUser;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateNameRequest, ListNamesQuery, Name};

/// List names, ordered by value.
#[utoipa::path(
    get,
    path = "/names",
    tag = "Names",
    params(("gender" = Option<String>, Query, description = "Only names of this gender (M or F)")),
    responses(
        (status = 200, description = "List of names", body = Vec<Name>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn list_names(
    _auth: RemoteUser,
    pool: web::Data<DbPool>,
    query: web::Query<ListNamesQuery>,
) -> AppResult<HttpResponse> {
    let names = pool
        .list_names(query.gender)
        .await?
        .into_iter()
        .map(Name::try_from)
        .collect::<AppResult<Vec<Name>>>()?;

    Ok(HttpResponse::Ok().json(names))
}

/// Propose a new name.
#[utoipa::path(
    post,
    path = "/names",
    tag = "Names",
    request_body = CreateNameRequest,
    responses(
        (status = 201, description = "Name created", body = Name),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 422, description = "Name already exists for this gender", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn create_name(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    body: web::Json<CreateNameRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let value = req.value.trim();
    if value.is_empty() {
        return Err(AppError::validation(
            &["body", "value"],
            "value must not be empty",
        ));
    }

    let name = pool.create_name(value, req.gender).await?;

    info!(name_id = %name.id, value = %name.value, gender = %name.gender, created_by = %auth.user.username, "Name created");

    Ok(HttpResponse::Created().json(Name::try_from(name)?))
}

/// Get a name by ID.
#[utoipa::path(
    get,
    path = "/names/{name_id}",
    tag = "Names",
    params(("name_id" = Uuid, Path, description = "Name ID")),
    responses(
        (status = 200, description = "Name", body = Name),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Name not found", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn get_name(
    _auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let name = pool
        .get_name(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Name".to_string()))?;

    Ok(HttpResponse::Ok().json(Name::try_from(name)?))
}

/// Delete a name by ID.
#[utoipa::path(
    delete,
    path = "/names/{name_id}",
    tag = "Names",
    params(("name_id" = Uuid, Path, description = "Name ID")),
    responses(
        (status = 204, description = "Name deleted"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Name not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Name already voted on", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn delete_name(
    auth: RemoteUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let name_id = path.into_inner();
    pool.delete_name(name_id).await?;

    info!(name_id = %name_id, deleted_by = %auth.user.username, "Name deleted");

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/names")
            .route(web::get().to(list_names))
            .route(web::post().to(create_name)),
    )
    .service(
        web::resource("/names/{name_id}")
            .route(web::get().to(get_name))
            .route(web::delete().to(delete_name)),
    );
}
