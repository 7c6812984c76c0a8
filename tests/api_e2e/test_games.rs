//! E2E tests: games and their visibility.

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_game_sets_owner() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post(
        &app,
        "/games",
        "alice",
        serde_json::json!({ "description": "Second child", "gender": "M" }),
    )
    .await;

    assert_eq!(status, 201, "{}", body);
    assert_eq!(body["owner"]["username"], "alice");
    assert_eq!(body["description"], "Second child");
    assert_eq!(body["gender"], "M");
}

#[actix_rt::test]
async fn test_create_game_without_fields() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post(&app, "/games", "alice", serde_json::json!({})).await;

    assert_eq!(status, 201, "{}", body);
    assert!(body["description"].is_null());
    assert!(body["gender"].is_null());
}

/// A user sees a game iff they own it or are one of its guests.
#[actix_rt::test]
async fn test_games_visible_to_owner_and_guests_only() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let shared = create_game(&app, "alice", None).await;
    let private = create_game(&app, "alice", None).await;
    let bobs = create_game(&app, "bob", None).await;
    add_guest(&app, "alice", &shared, "bob").await;
    user_id(&app, "eve").await;

    let (_, games) = get(&app, "/games", "alice").await;
    let ids = pluck(&games, "id");
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&shared));
    assert!(ids.contains(&private));

    let (_, games) = get(&app, "/games", "bob").await;
    let ids = pluck(&games, "id");
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&shared));
    assert!(ids.contains(&bobs));

    let (_, games) = get(&app, "/games", "eve").await;
    assert!(games.as_array().unwrap().is_empty());

    let (status, _) = get(&app, &format!("/games/{}", private), "bob").await;
    assert_eq!(status, 404);
    let (status, body) = get(&app, &format!("/games/{}", shared), "bob").await;
    assert_eq!(status, 200);
    assert_eq!(body["owner"]["username"], "alice");
}

/// Guests share the owner's write privilege.
#[actix_rt::test]
async fn test_update_game() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;
    add_guest(&app, "alice", &game, "bob").await;

    let (status, body) = put(
        &app,
        &format!("/games/{}", game),
        "bob",
        serde_json::json!({ "description": "Twins", "gender": "F" }),
    )
    .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["description"], "Twins");
    assert_eq!(body["gender"], "F");
    assert_eq!(body["owner"]["username"], "alice");

    let (status, _) = put(
        &app,
        &format!("/games/{}", game),
        "eve",
        serde_json::json!({ "description": "Hijacked" }),
    )
    .await;
    assert_eq!(status, 404);
}

/// Deleting a game removes its guests; later guest queries are not found.
#[actix_rt::test]
async fn test_delete_game_cascades() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;
    let name = create_name(&app, "Alice", "F").await;
    add_guest(&app, "alice", &game, "bob").await;
    vote(&app, "bob", &game, &name, true).await;

    let (status, _) = delete(&app, &format!("/games/{}", game), "alice").await;
    assert_eq!(status, 204);

    let (status, body) = get(&app, &format!("/games/{}/guests", game), "alice").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");

    // Bob's vote went with the game, so both rows are free again
    let bob = user_id(&app, "bob").await;
    let (status, _) = delete(&app, &format!("/users/{}", bob), "alice").await;
    assert_eq!(status, 204);
    let (status, _) = delete(&app, &format!("/names/{}", name), "alice").await;
    assert_eq!(status, 204);
}

#[actix_rt::test]
async fn test_delete_game_by_outsider_is_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;

    let (status, _) = delete(&app, &format!("/games/{}", game), "eve").await;
    assert_eq!(status, 404);

    let (status, _) = get(&app, &format!("/games/{}", game), "alice").await;
    assert_eq!(status, 200);
}
