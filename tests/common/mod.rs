// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use homepage_api::config::Config;
use homepage_api::db::{FirestoreStore, MemoryStore};
use homepage_api::error::AppError;
use homepage_api::models::Activity;
use homepage_api::routes::create_router;
use homepage_api::services::{ActivitySource, GameService, Notifier};
use homepage_api::AppState;
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a store backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn test_store() -> FirestoreStore {
    FirestoreStore::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Notifier that records every message, optionally failing each send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<String>>,
    pub fail: bool,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail {
            Err(AppError::Slack("channel_not_found".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Activity source returning a fixed list.
#[allow(dead_code)]
pub struct FakeActivities(pub Vec<Activity>);

#[async_trait]
impl ActivitySource for FakeActivities {
    async fn recent_activities(&self, limit: u32) -> Result<Vec<Activity>, AppError> {
        Ok(self.0.iter().take(limit as usize).cloned().collect())
    }
}

/// Activity source that always fails like an expired Strava token.
#[allow(dead_code)]
pub struct FailingActivities;

#[async_trait]
impl ActivitySource for FailingActivities {
    async fn recent_activities(&self, _limit: u32) -> Result<Vec<Activity>, AppError> {
        Err(AppError::StravaApi(AppError::STRAVA_TOKEN_ERROR.to_string()))
    }
}

/// Everything a test might want to poke at after building the app.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub store: MemoryStore,
    pub notifier: Arc<RecordingNotifier>,
}

/// Create a test app with in-memory dependencies.
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    build_test_app(Config::test_default(), RecordingNotifier::default(), None)
}

/// Create a test app with a custom config, notifier and activity source.
#[allow(dead_code)]
pub fn build_test_app(
    config: Config,
    notifier: RecordingNotifier,
    activity_source: Option<Arc<dyn ActivitySource>>,
) -> TestApp {
    let store = MemoryStore::new();
    let notifier = Arc::new(notifier);
    let game_service = GameService::new(Arc::new(store.clone()), notifier.clone());

    let state = Arc::new(AppState {
        config,
        game_service,
        notifier: notifier.clone(),
        activity_source,
        http: reqwest::Client::new(),
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        store,
        notifier,
    }
}

/// JSON POST request.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Empty GET request.
#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Strava summary activity starting at `start` (UTC), with local time
/// `offset_hours` ahead.
#[allow(dead_code)]
pub fn activity(
    id: u64,
    activity_type: &str,
    start: chrono::DateTime<chrono::Utc>,
    offset_hours: i64,
) -> Activity {
    let local = start + chrono::Duration::hours(offset_hours);
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("{} {}", activity_type, id),
        "type": activity_type,
        "sport_type": activity_type,
        "distance": 5000.0,
        "moving_time": 1500,
        "average_speed": 3.33,
        "average_heartrate": 150.0,
        "start_date": start.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        "start_date_local": local.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        "map": { "summary_polyline": "abc123" }
    }))
    .unwrap()
}
