// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Homepage API Server
//!
//! Serves the tic-tac-toe game and Strava streak endpoints for the
//! personal website.

use homepage_api::{
    config::Config,
    db::{FirestoreStore, MemoryStore, StateStore},
    services::{ActivitySource, GameService, LogNotifier, Notifier, SlackClient, StravaService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Homepage API");

    // Game state store
    let store: Arc<dyn StateStore> = match &config.gcp_project_id {
        Some(project_id) => Arc::new(FirestoreStore::new(project_id).await?),
        None => {
            tracing::warn!("GCP_PROJECT_ID not set, game state is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    // Host notifications
    let notifier: Arc<dyn Notifier> = match &config.slack_bot_token {
        Some(token) => {
            tracing::info!(channel = %config.slack_channel_id, "Slack notifications enabled");
            Arc::new(SlackClient::new(
                token.clone(),
                config.slack_channel_id.clone(),
            ))
        }
        None => {
            tracing::warn!("SLACK_BOT_TOKEN not set, notifications are only logged");
            Arc::new(LogNotifier)
        }
    };

    if config.slack_signing_secret.is_none() {
        tracing::warn!("SLACK_SIGNING_SECRET not set, Slack events are not verified");
    }

    // Strava activity source
    let activity_source = config.strava.clone().map(|credentials| {
        tracing::info!("Strava integration enabled");
        Arc::new(StravaService::new(credentials)) as Arc<dyn ActivitySource>
    });

    let game_service = GameService::new(store, notifier.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        game_service,
        notifier,
        activity_source,
        http: reqwest::Client::new(),
    });

    // Build router
    let app = homepage_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("homepage_api=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
