//! Actix-web extractor resolving the trusted-header user.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;

use super::RemoteAuth;
use crate::db::DbPool;
use crate::entity::user;
use crate::error::AppError;

/// The user making the request, created on first sight.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: RemoteUser) -> impl Responder {
///     // auth.user is the database row of the caller
/// }
/// ```
pub struct RemoteUser {
    pub user: user::Model,
}

impl FromRequest for RemoteUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let username = req
            .app_data::<web::Data<RemoteAuth>>()
            .and_then(|auth| auth.username(req));

        Box::pin(async move {
            let pool = pool.ok_or_else(|| {
                AppError::Database("Database pool not configured".to_string())
            })?;

            let username = username.ok_or_else(|| {
                AppError::Unauthorized("Could not validate credentials".to_string())
            })?;

            let user = pool.get_or_create_user(&username).await?;
            Ok(RemoteUser { user })
        })
    }
}
