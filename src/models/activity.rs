// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity model as returned by the activity list endpoint.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Summary activity from `/athlete/activities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    #[serde(default)]
    pub name: String,
    /// Legacy activity type (Run, WeightTraining, Ride, ...)
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Finer-grained sport type (TrailRun, VirtualRun, ...)
    #[serde(default)]
    pub sport_type: Option<String>,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Average speed in meters per second
    #[serde(default)]
    pub average_speed: f64,
    #[serde(default)]
    pub average_heartrate: Option<f64>,
    /// Start date/time in UTC (ISO 8601)
    #[serde(default)]
    pub start_date: String,
    /// Start date/time in the athlete's local time, with a literal `Z`
    #[serde(default)]
    pub start_date_local: String,
    #[serde(default)]
    pub map: Option<ActivityMap>,
}

impl Activity {
    /// Category from `sport_type`, falling back to the legacy `type`.
    pub fn category(&self) -> ActivityCategory {
        let activity_type = self
            .sport_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.activity_type);
        ActivityCategory::from_activity_type(activity_type)
    }

    pub fn summary_polyline(&self) -> Option<&str> {
        self.map
            .as_ref()
            .and_then(|m| m.summary_polyline.as_deref())
            .filter(|p| !p.is_empty())
    }
}

/// Activity map data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityMap {
    #[serde(default)]
    pub summary_polyline: Option<String>,
}

/// Streak category an activity counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Run,
    Gym,
    Other,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 3] = [
        ActivityCategory::Run,
        ActivityCategory::Gym,
        ActivityCategory::Other,
    ];

    /// Map a raw Strava type onto a category.
    pub fn from_activity_type(activity_type: &str) -> Self {
        match activity_type {
            "Run" | "TrailRun" | "VirtualRun" => ActivityCategory::Run,
            "WeightTraining" | "Workout" | "Crossfit" | "Yoga"
            | "HighIntensityIntervalTraining" => ActivityCategory::Gym,
            _ => ActivityCategory::Other,
        }
    }
}

/// Latest-activity card shown on the website.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivityHighlight {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    /// Distance in kilometers, two decimals
    pub distance_km: String,
    /// Pace in minutes per kilometer, two decimals, or "N/A"
    pub pace_min_per_km: String,
    pub heart_rate: Option<f64>,
    pub date: String,
    pub polyline: Option<String>,
}

impl ActivityHighlight {
    pub fn from_activity(activity: &Activity) -> Self {
        let pace_min_per_km = if activity.average_speed > 0.0 {
            format!("{:.2}", 1000.0 / (activity.average_speed * 60.0))
        } else {
            "N/A".to_string()
        };

        Self {
            id: activity.id,
            name: activity.name.clone(),
            distance_km: format!("{:.2}", activity.distance / 1000.0),
            pace_min_per_km,
            heart_rate: activity.average_heartrate,
            date: activity.start_date_local.clone(),
            polyline: activity.summary_polyline().map(str::to_string),
        }
    }
}
