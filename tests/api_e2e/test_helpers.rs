//! Shared test helpers for API E2E tests.

use actix_web::{App, dev::ServiceResponse, http::Method, test, web};
use prenoms_lib::api;
use prenoms_lib::auth::RemoteAuth;
use prenoms_lib::config::{DEFAULT_AUTH_HEADER, DatabaseSettings};
use prenoms_lib::db::DbPool;
use prenoms_lib::middleware::RequestLogger;
use serde_json::Value;

/// Create a fresh in-memory database with migrations applied.
///
/// One connection only: every new SQLite memory connection is a new database.
pub async fn create_test_pool() -> DbPool {
    let pool = DbPool::connect(&DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    })
    .await
    .expect("Failed to open in-memory database");

    pool.run_migrations()
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create a test app with routes mounted at the root.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    create_test_app_with_prefix(pool, "").await
}

/// Create a test app with routes mounted under `prefix`.
pub async fn create_test_app_with_prefix(
    pool: &DbPool,
    prefix: &str,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(RequestLogger::new(DEFAULT_AUTH_HEADER))
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(RemoteAuth::default()))
            .app_data(api::json_config())
            .app_data(api::path_config())
            .app_data(api::query_config())
            .service(web::scope(prefix).configure(api::configure)),
    )
    .await
}

/// Send a request as `user` (or anonymously) and return status and JSON body.
///
/// Empty bodies come back as `Value::Null`.
pub async fn send<S>(
    app: &S,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let mut req = test::TestRequest::default().method(method).uri(uri);
    if let Some(user) = user {
        req = req.insert_header((DEFAULT_AUTH_HEADER, user));
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };
    (status, body)
}

pub async fn get<S>(app: &S, uri: &str, user: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, Method::GET, uri, Some(user), None).await
}

pub async fn post<S>(app: &S, uri: &str, user: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, Method::POST, uri, Some(user), Some(body)).await
}

pub async fn put<S>(app: &S, uri: &str, user: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, Method::PUT, uri, Some(user), Some(body)).await
}

pub async fn delete<S>(app: &S, uri: &str, user: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, Method::DELETE, uri, Some(user), None).await
}

/// Make sure `username` exists and return its ID.
pub async fn user_id<S>(app: &S, username: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = get(app, "/me", username).await;
    assert_eq!(status, 200, "Failed to resolve user: {}", body);
    body["id"].as_str().expect("user id").to_string()
}

/// Create a name and return its ID.
pub async fn create_name<S>(app: &S, value: &str, gender: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post(
        app,
        "/names",
        "admin",
        serde_json::json!({ "value": value, "gender": gender }),
    )
    .await;
    assert_eq!(status, 201, "Failed to create name: {}", body);
    body["id"].as_str().expect("name id").to_string()
}

/// Create a game owned by `owner` and return its ID.
pub async fn create_game<S>(app: &S, owner: &str, gender: Option<&str>) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post(
        app,
        "/games",
        owner,
        serde_json::json!({ "description": "Baby #1", "gender": gender }),
    )
    .await;
    assert_eq!(status, 201, "Failed to create game: {}", body);
    body["id"].as_str().expect("game id").to_string()
}

/// Invite `guest` to a game as `owner`.
pub async fn add_guest<S>(app: &S, owner: &str, game_id: &str, guest: &str)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let guest_id = user_id(app, guest).await;
    let (status, body) = post(
        app,
        &format!("/games/{}/guests", game_id),
        owner,
        serde_json::json!({ "user_id": guest_id }),
    )
    .await;
    assert_eq!(status, 200, "Failed to add guest: {}", body);
}

/// Vote on a name as `user`.
pub async fn vote<S>(app: &S, user: &str, game_id: &str, name_id: &str, choice: bool) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    post(
        app,
        &format!("/games/{}/stage-1", game_id),
        user,
        serde_json::json!({ "name_id": name_id, "choice": choice }),
    )
    .await
}

/// Extract a string field from each element of a JSON array.
pub fn pluck(body: &Value, field: &str) -> Vec<String> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|item| item[field].as_str().unwrap_or_default().to_string())
        .collect()
}
