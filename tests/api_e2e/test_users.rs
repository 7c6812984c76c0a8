//! E2E tests: identity resolution and user management.

use actix_web::http::Method;

use super::test_helpers::*;

/// (1) No identity header → 401 on every protected route.
#[actix_rt::test]
async fn test_missing_header_is_unauthorized() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    for uri in ["/me", "/users", "/names", "/games"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, 401, "{} should require identity", uri);
        assert_eq!(body["error"], "UNAUTHORIZED");
    }
}

/// (2) Blank header value counts as missing.
#[actix_rt::test]
async fn test_blank_header_is_unauthorized() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, _) = get(&app, "/me", "   ").await;
    assert_eq!(status, 401);
}

/// (3) First request creates the user, later ones reuse it.
#[actix_rt::test]
async fn test_me_creates_user_once() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, first) = get(&app, "/me", "alice").await;
    assert_eq!(status, 200);
    assert_eq!(first["username"], "alice");
    assert!(first["created_at"].is_string());

    let (_, second) = get(&app, "/me", "alice").await;
    assert_eq!(first["id"], second["id"]);

    let (_, users) = get(&app, "/users", "alice").await;
    assert_eq!(pluck(&users, "username"), vec!["alice"]);
}

/// (4) Users are listed by username.
#[actix_rt::test]
async fn test_list_users_sorted() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    for name in ["charlie", "alice", "bob"] {
        user_id(&app, name).await;
    }

    let (status, users) = get(&app, "/users", "alice").await;
    assert_eq!(status, 200);
    assert_eq!(pluck(&users, "username"), vec!["alice", "bob", "charlie"]);
}

/// (5) Explicit creation rejects duplicates and blanks with 422.
#[actix_rt::test]
async fn test_create_user_validation() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post(&app, "/users", "alice", serde_json::json!({ "username": "bob" })).await;
    assert_eq!(status, 201, "{}", body);
    assert_eq!(body["username"], "bob");

    let (status, body) = post(&app, "/users", "alice", serde_json::json!({ "username": "bob" })).await;
    assert_eq!(status, 422);
    assert_eq!(body["detail"][0]["type"], "type_error.already_exists");
    assert_eq!(body["detail"][0]["loc"], serde_json::json!(["body", "username"]));

    let (status, body) = post(&app, "/users", "alice", serde_json::json!({ "username": "  " })).await;
    assert_eq!(status, 422);
    assert_eq!(body["detail"][0]["type"], "value_error");
}

/// (6) Unknown and malformed user IDs.
#[actix_rt::test]
async fn test_get_user_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, _) = get(&app, &format!("/users/{}", uuid::Uuid::new_v4()), "alice").await;
    assert_eq!(status, 404);

    let (status, body) = get(&app, "/users/not-a-uuid", "alice").await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

/// (7) A user owning a game cannot be deleted; a free one can.
#[actix_rt::test]
async fn test_delete_user() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let alice = user_id(&app, "alice").await;
    let bob = user_id(&app, "bob").await;
    create_game(&app, "alice", None).await;

    let (status, body) = delete(&app, &format!("/users/{}", alice), "bob").await;
    assert_eq!(status, 422);
    assert_eq!(body["detail"][0]["type"], "type_error.in_use");

    let (status, _) = delete(&app, &format!("/users/{}", bob), "alice").await;
    assert_eq!(status, 204);

    let (status, _) = get(&app, &format!("/users/{}", bob), "alice").await;
    assert_eq!(status, 404);
}
