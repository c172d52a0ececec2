// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Slack routes: Events API webhook (host moves) and the run status ping.

use crate::error::{AppError, Result};
use crate::middleware::require_slack_signature;
use crate::models::Player;
use crate::services::game::host_result_reply;
use crate::services::slack::send_run_ping;
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Slack routes. Event delivery is signature-checked.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/slack/events",
            post(handle_event)
                .route_layer(middleware::from_fn_with_state(state, require_slack_signature)),
        )
        .route("/api/slack/ping", post(ping))
}

/// Outer Events API payload.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SlackPayload {
    UrlVerification { challenge: String },
    EventCallback { event: SlackEvent },
    #[serde(other)]
    Other,
}

/// Inner event of an `event_callback`.
#[derive(Deserialize, Debug)]
struct SlackEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    text: Option<String>,
    /// Present on messages posted by bots (including our own)
    #[serde(default)]
    bot_id: Option<String>,
}

#[derive(Serialize)]
struct ChallengeResponse {
    challenge: String,
}

/// Parse a chat message as a move: exactly one digit 0-8.
fn parse_move(text: &str) -> Option<i64> {
    match text.trim().as_bytes() {
        [digit @ b'0'..=b'8'] => Some(i64::from(digit - b'0')),
        _ => None,
    }
}

/// Handle Slack events (POST).
///
/// Slack retries anything that is not a quick 2xx, so rejected moves and
/// unrelated messages are acknowledged with 200.
async fn handle_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SlackPayload>,
) -> Result<Response> {
    let event = match payload {
        SlackPayload::UrlVerification { challenge } => {
            tracing::info!("Slack URL verification");
            return Ok(Json(ChallengeResponse { challenge }).into_response());
        }
        SlackPayload::EventCallback { event } => event,
        SlackPayload::Other => return Ok(StatusCode::OK.into_response()),
    };

    if event.event_type != "message" || event.bot_id.is_some() {
        return Ok(StatusCode::OK.into_response());
    }

    let Some(position) = event.text.as_deref().and_then(parse_move) else {
        return Ok(StatusCode::OK.into_response());
    };

    tracing::info!(position, "Host move received from Slack");

    let reply = match state.game_service.apply_move(Player::Host, position).await {
        Ok(outcome) => host_result_reply(position as usize, outcome.game.status),
        Err(AppError::CellOccupied(cell)) => Some(format!("❌ Cell {} is already taken!", cell)),
        Err(e) if e.is_move_rejection() => {
            tracing::debug!(reason = %e, "Ignoring Slack move");
            None
        }
        Err(e) => return Err(e),
    };

    if let Some(text) = reply {
        if let Err(e) = state.notifier.send(&text).await {
            tracing::warn!(error = %e, "Failed to send Slack reply");
        }
    }

    Ok(StatusCode::OK.into_response())
}

#[derive(Serialize)]
struct PingResponse {
    success: bool,
}

/// Ask the host whether they will run today.
async fn ping(State(state): State<Arc<AppState>>) -> Result<Json<PingResponse>> {
    let webhook_url = state
        .config
        .slack_webhook_url
        .as_deref()
        .ok_or(AppError::NotConfigured("Slack webhook URL"))?;

    send_run_ping(&state.http, webhook_url, &state.config.frontend_url).await?;
    Ok(Json(PingResponse { success: true }))
}
