// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava overview endpoint tests.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use homepage_api::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{
    activity, body_json, build_test_app, create_test_app, get, FailingActivities, FakeActivities,
    RecordingNotifier,
};

#[tokio::test]
async fn test_not_configured() {
    let app = create_test_app();

    let response = app.router.oneshot(get("/api/strava")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_latest_activity_and_streak() {
    let now = Utc::now();
    let activities = vec![
        activity(3, "Run", now, 0),
        activity(2, "WeightTraining", now - Duration::days(1), 0),
        activity(1, "Run", now - Duration::days(2), 0),
    ];
    let app = build_test_app(
        Config::test_default(),
        RecordingNotifier::default(),
        Some(Arc::new(FakeActivities(activities))),
    );

    let response = app.router.oneshot(get("/api/strava")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let latest = &body["latest"];
    assert_eq!(latest["id"], 3);
    assert_eq!(latest["distanceKm"], "5.00");
    assert_eq!(latest["paceMinPerKm"], "5.01");
    assert_eq!(latest["polyline"], "abc123");

    let streak = &body["streak"];
    assert_eq!(streak["totalStreakDays"], 3);
    assert_eq!(streak["hasActivityToday"], true);
    assert_eq!(streak["perCategoryStreakDays"]["run"], 1);
    assert_eq!(streak["perCategoryStreakDays"]["gym"], 1);
    assert_eq!(streak["perCategoryStreakDays"]["other"], 0);
    assert_eq!(streak["totalDistanceInStreak"], 15000.0);
    assert_eq!(streak["totalTimeInStreak"], 4500);
}

#[tokio::test]
async fn test_no_activities() {
    let app = build_test_app(
        Config::test_default(),
        RecordingNotifier::default(),
        Some(Arc::new(FakeActivities(Vec::new()))),
    );

    let response = app.router.oneshot(get("/api/strava")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["latest"].is_null());
    assert_eq!(body["streak"]["totalStreakDays"], 0);
    assert_eq!(body["streak"]["hasActivityToday"], false);
}

#[tokio::test]
async fn test_window_limits_activities() {
    let now = Utc::now();
    let activities = (0..5)
        .map(|day| activity(100 - day, "Run", now - Duration::days(day as i64), 0))
        .collect();
    let config = Config {
        streak_activity_window: 2,
        ..Config::test_default()
    };
    let app = build_test_app(
        config,
        RecordingNotifier::default(),
        Some(Arc::new(FakeActivities(activities))),
    );

    let body = body_json(app.router.oneshot(get("/api/strava")).await.unwrap()).await;
    assert_eq!(body["streak"]["totalStreakDays"], 2);
}

#[tokio::test]
async fn test_upstream_error_is_bad_gateway() {
    let app = build_test_app(
        Config::test_default(),
        RecordingNotifier::default(),
        Some(Arc::new(FailingActivities)),
    );

    let response = app.router.oneshot(get("/api/strava")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"], "strava_error");
}
