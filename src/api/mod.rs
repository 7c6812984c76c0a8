//! API endpoint modules.

use actix_web::{HttpRequest, error, web};

use crate::error::AppError;

pub mod games;
pub mod health;
pub mod me;
pub mod names;
pub mod openapi;
pub mod users;

pub use games::configure_routes as configure_game_routes;
pub use health::configure_health_routes;
pub use me::configure_routes as configure_me_routes;
pub use names::configure_routes as configure_name_routes;
pub use openapi::ApiDoc;
pub use users::configure_routes as configure_user_routes;

/// Register every API route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_me_routes)
        .configure(configure_user_routes)
        .configure(configure_name_routes)
        .configure(configure_game_routes);
}

/// JSON body extractor config. Malformed bodies become 422 validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        AppError::validation(&["body"], err.to_string()).into()
    })
}

/// Path extractor config. Non-UUID identifiers become 422 validation errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: error::PathError, _req: &HttpRequest| {
        AppError::validation(&["path"], err.to_string()).into()
    })
}

/// Query string extractor config. Unknown genders become 422 validation errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
        AppError::validation(&["query"], err.to_string()).into()
    })
}
