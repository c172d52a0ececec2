// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava activity routes.

use crate::error::{AppError, Result};
use crate::models::{ActivityHighlight, StreakReport};
use crate::services::compute_streaks;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Strava routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/strava", get(get_overview))
}

/// Latest activity plus streaks.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StravaOverview {
    /// `None` when the account has no activities
    pub latest: Option<ActivityHighlight>,
    pub streak: StreakReport,
}

async fn get_overview(State(state): State<Arc<AppState>>) -> Result<Json<StravaOverview>> {
    let source = state
        .activity_source
        .as_ref()
        .ok_or(AppError::NotConfigured("Strava credentials"))?;

    let activities = source
        .recent_activities(state.config.streak_activity_window)
        .await?;

    let offset = state
        .config
        .streak_utc_offset_minutes
        .map(|minutes| chrono::Duration::minutes(i64::from(minutes)));
    let streak = compute_streaks(&activities, chrono::Utc::now(), offset);

    tracing::debug!(
        activities = activities.len(),
        streak_days = streak.total_streak_days,
        has_activity_today = streak.has_activity_today,
        "Computed streaks"
    );

    Ok(Json(StravaOverview {
        latest: activities.first().map(ActivityHighlight::from_activity),
        streak,
    }))
}
