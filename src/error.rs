// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid position (0-8): {0}")]
    InvalidPosition(String),

    #[error("It's {0}'s turn")]
    WrongTurn(String),

    #[error("Cell {0} is already taken")]
    CellOccupied(usize),

    #[error("Game is not active")]
    GameNotActive,

    #[error("Invalid request signature")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Strava API error: {0}")]
    StravaApi(String),

    #[error("Slack API error: {0}")]
    Slack(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Strava rate limit message (HTTP 429).
    pub const STRAVA_RATE_LIMIT: &'static str = "Rate limit exceeded";
    /// Strava rejected the access or refresh token (HTTP 401).
    pub const STRAVA_TOKEN_ERROR: &'static str = "Token expired or invalid";

    /// True for the rejected-move conditions of the game engine.
    pub fn is_move_rejection(&self) -> bool {
        matches!(
            self,
            AppError::InvalidPosition(_)
                | AppError::WrongTurn(_)
                | AppError::CellOccupied(_)
                | AppError::GameNotActive
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let details = Some(self.to_string());
        let (status, error, details) = match &self {
            AppError::InvalidPosition(_) => (StatusCode::BAD_REQUEST, "invalid_position", details),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::WrongTurn(_) => (StatusCode::CONFLICT, "wrong_turn", details),
            AppError::CellOccupied(_) => (StatusCode::CONFLICT, "cell_occupied", details),
            AppError::GameNotActive => (StatusCode::CONFLICT, "game_not_active", details),
            AppError::NotConfigured(what) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_configured",
                Some(what.to_string()),
            ),
            AppError::StravaApi(msg) => {
                (StatusCode::BAD_GATEWAY, "strava_error", Some(msg.clone()))
            }
            AppError::Slack(msg) => (StatusCode::BAD_GATEWAY, "slack_error", Some(msg.clone())),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
