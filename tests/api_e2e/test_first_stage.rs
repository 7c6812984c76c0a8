//! E2E tests: first stage voting and results.

use super::test_helpers::*;

/// Owner and guest both accept "Alice", "Bob" gets a no and a silence.
#[actix_rt::test]
async fn test_unanimous_result() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;
    add_guest(&app, "alice", &game, "bob").await;
    let alice_name = create_name(&app, "Alice", "F").await;
    let bob_name = create_name(&app, "Bob", "M").await;

    let (status, body) = vote(&app, "alice", &game, &alice_name, true).await;
    assert_eq!(status, 201, "{}", body);
    assert_eq!(body["choice"], true);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["name"]["value"], "Alice");
    assert_eq!(body["game"]["owner"]["username"], "alice");

    vote(&app, "bob", &game, &alice_name, true).await;
    vote(&app, "alice", &game, &bob_name, false).await;

    let (status, result) = get(&app, &format!("/games/{}/stage-1/result", game), "bob").await;
    assert_eq!(status, 200);
    assert_eq!(pluck(&result, "value"), vec!["Alice"]);
}

/// Results are sorted by value.
#[actix_rt::test]
async fn test_result_sorted() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;
    for value in ["Zoe", "Emma", "Louise"] {
        let id = create_name(&app, value, "F").await;
        vote(&app, "alice", &game, &id, true).await;
    }

    let (_, result) = get(&app, &format!("/games/{}/stage-1/result", game), "alice").await;
    assert_eq!(pluck(&result, "value"), vec!["Emma", "Louise", "Zoe"]);
}

/// Participants are counted when the result is read, not when votes are cast.
#[actix_rt::test]
async fn test_result_recomputed_after_guest_removal() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;
    add_guest(&app, "alice", &game, "bob").await;
    add_guest(&app, "alice", &game, "carol").await;
    let name = create_name(&app, "Jules", "M").await;
    let result_uri = format!("/games/{}/stage-1/result", game);

    vote(&app, "alice", &game, &name, true).await;
    vote(&app, "bob", &game, &name, true).await;

    // Carol has not voted yet
    let (_, result) = get(&app, &result_uri, "alice").await;
    assert!(result.as_array().unwrap().is_empty());

    let carol = user_id(&app, "carol").await;
    delete(&app, &format!("/games/{}/guests/{}", game, carol), "alice").await;

    let (_, result) = get(&app, &result_uri, "alice").await;
    assert_eq!(pluck(&result, "value"), vec!["Jules"]);

    // Removing a yes-voter keeps the name too
    let bob = user_id(&app, "bob").await;
    delete(&app, &format!("/games/{}/guests/{}", game, bob), "alice").await;

    let (_, result) = get(&app, &result_uri, "alice").await;
    assert_eq!(pluck(&result, "value"), vec!["Jules"]);
}

#[actix_rt::test]
async fn test_duplicate_vote_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;
    let name = create_name(&app, "Alice", "F").await;

    let (status, _) = vote(&app, "alice", &game, &name, true).await;
    assert_eq!(status, 201);

    let (status, body) = vote(&app, "alice", &game, &name, false).await;
    assert_eq!(status, 422);
    assert_eq!(body["detail"][0]["type"], "type_error.already_exists");
    assert_eq!(body["detail"][0]["loc"], serde_json::json!(["body", "name_id"]));
}

#[actix_rt::test]
async fn test_vote_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;
    let name = create_name(&app, "Alice", "F").await;

    let (status, _) = vote(&app, "eve", &game, &name, true).await;
    assert_eq!(status, 404);

    let (status, body) = vote(&app, "alice", &game, &uuid::Uuid::new_v4().to_string(), true).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Name not found");

    let (status, _) = post(
        &app,
        &format!("/games/{}/stage-1", game),
        "alice",
        serde_json::json!({ "name_id": name }),
    )
    .await;
    assert_eq!(status, 422);
}

/// Next name honors the game's gender for owner and guest alike.
#[actix_rt::test]
async fn test_next_name_respects_gender() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", Some("M")).await;
    add_guest(&app, "alice", &game, "bob").await;
    let paul = create_name(&app, "Paul", "M").await;
    create_name(&app, "Emma", "F").await;
    let next_uri = format!("/games/{}/stage-1/next", game);

    for user in ["alice", "bob"] {
        let (status, next) = get(&app, &next_uri, user).await;
        assert_eq!(status, 200);
        assert_eq!(next["id"], paul.as_str());
        assert_eq!(next["gender"], "M");

        vote(&app, user, &game, &paul, true).await;

        let (status, next) = get(&app, &next_uri, user).await;
        assert_eq!(status, 200);
        assert!(next.is_null(), "{} should have nothing left: {}", user, next);
    }
}

/// Next name walks candidates in value order and skips voted ones.
#[actix_rt::test]
async fn test_next_name_order() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;
    let zoe = create_name(&app, "Zoe", "F").await;
    let adam = create_name(&app, "Adam", "M").await;
    let next_uri = format!("/games/{}/stage-1/next", game);

    let (_, next) = get(&app, &next_uri, "alice").await;
    assert_eq!(next["id"], adam.as_str());

    vote(&app, "alice", &game, &adam, false).await;

    let (_, next) = get(&app, &next_uri, "alice").await;
    assert_eq!(next["id"], zoe.as_str());
}

/// The game's gender restriction is not enforced on votes.
#[actix_rt::test]
async fn test_out_of_gender_vote_is_accepted() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", Some("M")).await;
    let emma = create_name(&app, "Emma", "F").await;

    let (status, body) = vote(&app, "alice", &game, &emma, true).await;
    assert_eq!(status, 201, "{}", body);
}

#[actix_rt::test]
async fn test_result_hidden_from_outsiders() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let game = create_game(&app, "alice", None).await;

    let (status, _) = get(&app, &format!("/games/{}/stage-1/result", game), "eve").await;
    assert_eq!(status, 404);
    let (status, _) = get(&app, &format!("/games/{}/stage-1/next", game), "eve").await;
    assert_eq!(status, 404);
}
