//! Current user endpoint.

use actix_web::{HttpResponse, web};

use crate::auth::RemoteUser;
use crate::error::AppResult;
use crate::models::User;

/// Get the profile of the authenticated user.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn me(auth: RemoteUser) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(User::from(auth.user)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me").route(web::get().to(me)));
}
