// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Consecutive-day activity streak report.
//!
//! Derived on every request from the recent activity window; never stored.

use crate::models::ActivityCategory;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    /// Consecutive days with any activity
    pub total_streak_days: u32,
    /// Consecutive days per category (every category present)
    pub per_category_streak_days: BTreeMap<ActivityCategory, u32>,
    pub has_activity_today: bool,
    /// Distance within the total streak window (meters)
    pub total_distance_in_streak: f64,
    /// Moving time within the total streak window (seconds)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_time_in_streak: u64,
    /// Local calendar date the streak is anchored to
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub today: NaiveDate,
    /// Offset from UTC that was applied
    pub utc_offset_minutes: i64,
}

impl StreakReport {
    /// Report with every counter at zero.
    pub fn empty(today: NaiveDate, utc_offset_minutes: i64) -> Self {
        Self {
            total_streak_days: 0,
            per_category_streak_days: ActivityCategory::ALL.iter().map(|&c| (c, 0)).collect(),
            has_activity_today: false,
            total_distance_in_streak: 0.0,
            total_time_in_streak: 0,
            today,
            utc_offset_minutes,
        }
    }

    pub fn category_streak(&self, category: ActivityCategory) -> u32 {
        self.per_category_streak_days
            .get(&category)
            .copied()
            .unwrap_or(0)
    }
}
