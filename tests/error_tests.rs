// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use homepage_api::error::AppError;

#[test]
fn test_move_rejections() {
    assert!(AppError::InvalidPosition("9".to_string()).is_move_rejection());
    assert!(AppError::WrongTurn("The World".to_string()).is_move_rejection());
    assert!(AppError::CellOccupied(4).is_move_rejection());
    assert!(AppError::GameNotActive.is_move_rejection());

    assert!(!AppError::Unauthorized.is_move_rejection());
    assert!(!AppError::Database("unavailable".to_string()).is_move_rejection());
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::InvalidPosition("x".to_string()), StatusCode::BAD_REQUEST),
        (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::WrongTurn("the host".to_string()), StatusCode::CONFLICT),
        (AppError::CellOccupied(0), StatusCode::CONFLICT),
        (AppError::GameNotActive, StatusCode::CONFLICT),
        (AppError::NotConfigured("Strava"), StatusCode::SERVICE_UNAVAILABLE),
        (
            AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string()),
            StatusCode::BAD_GATEWAY,
        ),
        (AppError::Slack("invalid_auth".to_string()), StatusCode::BAD_GATEWAY),
        (
            AppError::Database("unavailable".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let label = error.to_string();
        assert_eq!(error.into_response().status(), expected, "{}", label);
    }
}
