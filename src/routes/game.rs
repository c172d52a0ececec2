// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tic-tac-toe routes.

use crate::error::{AppError, Result};
use crate::models::{Game, Player};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Response header reporting what happened to the move notification.
pub const NOTIFICATION_STATUS_HEADER: &str = "x-notification-status";

/// Game routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tictactoe", get(get_game).post(world_move))
        .route("/api/tictactoe/host-move", post(host_move))
        .route("/api/tictactoe/reset", post(reset_game))
}

/// Move request body. `position` is checked by hand so that a string or
/// fractional value is reported as an invalid position. Bodies that are not
/// JSON at all are rejected as bad requests.
#[derive(Deserialize)]
struct MoveRequest {
    #[serde(default)]
    position: serde_json::Value,
}

impl MoveRequest {
    fn position(&self) -> Result<i64> {
        self.position
            .as_i64()
            .ok_or_else(|| AppError::InvalidPosition(self.position.to_string()))
    }
}

/// Get the current game (created on first access).
async fn get_game(State(state): State<Arc<AppState>>) -> Result<Json<Game>> {
    Ok(Json(state.game_service.get_state().await?))
}

/// Move for the world (website visitors).
async fn world_move(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<MoveRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = body?;
    apply_move(&state, Player::World, &request).await
}

/// Move for the host, outside of Slack.
async fn host_move(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<MoveRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = body?;
    apply_move(&state, Player::Host, &request).await
}

async fn apply_move(
    state: &AppState,
    player: Player,
    request: &MoveRequest,
) -> Result<impl IntoResponse> {
    let position = request.position()?;
    let outcome = state.game_service.apply_move(player, position).await?;

    Ok((
        [(NOTIFICATION_STATUS_HEADER, outcome.notification.as_str())],
        Json(outcome.game),
    ))
}

/// Start a new game, keeping the stats.
async fn reset_game(State(state): State<Arc<AppState>>) -> Result<Json<Game>> {
    Ok(Json(state.game_service.reset().await?))
}
