// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tic-tac-toe HTTP API tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, build_test_app, create_test_app, get, post_json, RecordingNotifier};

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_get_initializes_fresh_game() {
    let app = create_test_app();
    assert!(app.store.is_empty());

    let response = app.router.oneshot(get("/api/tictactoe")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let game = body_json(response).await;
    assert_eq!(game["board"], json!(["", "", "", "", "", "", "", "", ""]));
    assert_eq!(game["currentTurn"], "world");
    assert_eq!(game["status"], "active");
    assert_eq!(game["moveHistory"], json!([]));
    assert_eq!(
        game["stats"],
        json!({"hostWins": 0, "worldWins": 0, "draws": 0})
    );
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_world_move_success() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(post_json("/api/tictactoe", json!({"position": 4})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-notification-status"], "sent");

    let game = body_json(response).await;
    assert_eq!(game["board"][4], "O");
    assert_eq!(game["currentTurn"], "host");
    assert_eq!(game["moveHistory"][0]["player"], "world");
    assert_eq!(game["moveHistory"][0]["position"], 4);

    let messages = app.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("center (4)"));
}

#[tokio::test]
async fn test_host_move_via_api() {
    let app = create_test_app();

    app.router
        .clone()
        .oneshot(post_json("/api/tictactoe", json!({"position": 0})))
        .await
        .unwrap();
    let response = app
        .router
        .oneshot(post_json("/api/tictactoe/host-move", json!({"position": 8})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let game = body_json(response).await;
    assert_eq!(game["board"][8], "X");
    assert_eq!(game["currentTurn"], "world");
}

#[tokio::test]
async fn test_invalid_positions_rejected() {
    let app = create_test_app();

    for body in [
        json!({"position": 9}),
        json!({"position": -1}),
        json!({"position": "4"}),
        json!({"position": 1.5}),
        json!({}),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/api/tictactoe", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(body_json(response).await["error"], "invalid_position");
    }

    assert!(app.store.is_empty(), "rejected moves must not persist");
    assert!(app.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = create_test_app();

    let not_json = Request::builder()
        .method("POST")
        .uri("/api/tictactoe")
        .header("content-type", "application/json")
        .body(Body::from("position=4"))
        .unwrap();
    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/tictactoe/host-move")
        .body(Body::from(r#"{"position": 4}"#))
        .unwrap();

    for request in [not_json, no_content_type] {
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "bad_request");
        assert!(body["details"].is_string());
    }

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_wrong_turn_conflict() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(post_json("/api/tictactoe/host-move", json!({"position": 0})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "wrong_turn");
}

#[tokio::test]
async fn test_occupied_cell_conflict() {
    let app = create_test_app();

    app.router
        .clone()
        .oneshot(post_json("/api/tictactoe", json!({"position": 4})))
        .await
        .unwrap();
    let response = app
        .router
        .oneshot(post_json("/api/tictactoe/host-move", json!({"position": 4})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "cell_occupied");
}

#[tokio::test]
async fn test_full_game_then_reset() {
    let app = create_test_app();

    // World takes the left column
    for (uri, position) in [
        ("/api/tictactoe", 0),
        ("/api/tictactoe/host-move", 1),
        ("/api/tictactoe", 3),
        ("/api/tictactoe/host-move", 2),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(post_json(uri, json!({"position": position})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .router
        .clone()
        .oneshot(post_json("/api/tictactoe", json!({"position": 6})))
        .await
        .unwrap();
    assert_eq!(response.headers()["x-notification-status"], "skipped");
    let game = body_json(response).await;
    assert_eq!(game["status"], "worldWon");
    assert_eq!(game["stats"]["worldWins"], 1);

    let response = app
        .router
        .clone()
        .oneshot(post_json("/api/tictactoe/host-move", json!({"position": 8})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "game_not_active");

    let response = app
        .router
        .oneshot(post_json("/api/tictactoe/reset", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let game = body_json(response).await;
    assert_eq!(game["status"], "active");
    assert_eq!(game["currentTurn"], "world");
    assert_eq!(game["moveHistory"], json!([]));
    assert_eq!(game["stats"]["worldWins"], 1);
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_move() {
    let app = build_test_app(
        homepage_api::config::Config::test_default(),
        RecordingNotifier::failing(),
        None,
    );

    let response = app
        .router
        .clone()
        .oneshot(post_json("/api/tictactoe", json!({"position": 2})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-notification-status"], "failed");

    let response = app.router.oneshot(get("/api/tictactoe")).await.unwrap();
    let game = body_json(response).await;
    assert_eq!(game["board"][2], "O");
    assert_eq!(game["currentTurn"], "host");
}
