// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Consecutive-day streak computation over recent activities.
//!
//! Activities are bucketed by the calendar date of their local start time.
//! A streak is anchored to the most recent bucketed day and only counts if
//! that day is today or yesterday in the athlete's local time.
//!
//! The UTC offset is either configured or derived by diffing one activity's
//! UTC and local timestamps. The derivation is best effort: it reflects the
//! offset in effect when that activity started, so it can be an hour off
//! across a daylight saving change.

use crate::models::{Activity, ActivityCategory, StreakReport};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use std::collections::{BTreeMap, HashSet};

/// Compute the streak report for `activities` (most recent first).
pub fn compute_streaks(
    activities: &[Activity],
    now: DateTime<Utc>,
    configured_offset: Option<Duration>,
) -> StreakReport {
    let offset = configured_offset.unwrap_or_else(|| derive_utc_offset(activities.first()));
    let today = (now + offset).date_naive();
    let mut report = StreakReport::empty(today, offset.num_minutes());

    // Bucket by local calendar date
    let mut buckets: BTreeMap<NaiveDate, HashSet<ActivityCategory>> = BTreeMap::new();
    let mut dated: Vec<(NaiveDate, &Activity)> = Vec::with_capacity(activities.len());
    for activity in activities {
        match local_date(&activity.start_date_local) {
            Some(date) => {
                buckets.entry(date).or_default().insert(activity.category());
                dated.push((date, activity));
            }
            None => {
                tracing::debug!(
                    activity_id = activity.id,
                    start_date_local = %activity.start_date_local,
                    "Skipping activity with malformed local start time"
                );
            }
        }
    }

    report.has_activity_today = buckets.get(&today).is_some_and(|c| !c.is_empty());

    let dates: Vec<NaiveDate> = buckets.keys().rev().copied().collect();
    let window = consecutive_days(&dates, today);
    report.total_streak_days = window.len() as u32;

    for category in ActivityCategory::ALL {
        let category_dates: Vec<NaiveDate> = buckets
            .iter()
            .rev()
            .filter(|(_, categories)| categories.contains(&category))
            .map(|(date, _)| *date)
            .collect();
        let days = consecutive_days(&category_dates, today).len() as u32;
        report.per_category_streak_days.insert(category, days);
    }

    let window: HashSet<NaiveDate> = window.into_iter().collect();
    for (date, activity) in dated {
        if window.contains(&date) {
            report.total_distance_in_streak += activity.distance;
            report.total_time_in_streak += activity.moving_time;
        }
    }

    report
}

/// Walk `dates` (descending, distinct) from the most recent day while each
/// day is exactly one before the previous. Empty when the most recent day
/// is older than yesterday.
fn consecutive_days(dates: &[NaiveDate], today: NaiveDate) -> Vec<NaiveDate> {
    let Some(&most_recent) = dates.first() else {
        return Vec::new();
    };

    if today.signed_duration_since(most_recent).num_days() > 1 {
        return Vec::new();
    }

    let mut streak = Vec::new();
    let mut expected = most_recent;
    for &date in dates {
        if date != expected {
            break;
        }
        streak.push(date);
        match date.pred_opt() {
            Some(previous) => expected = previous,
            None => break,
        }
    }
    streak
}

/// Local offset implied by an activity's paired timestamps, zero if either
/// one does not parse.
pub fn derive_utc_offset(activity: Option<&Activity>) -> Duration {
    activity
        .and_then(|a| {
            let utc = parse_timestamp(&a.start_date)?;
            let local = parse_timestamp(&a.start_date_local)?;
            Some(local.signed_duration_since(utc))
        })
        .unwrap_or_else(Duration::zero)
}

/// Parse an ISO 8601 timestamp, treating a missing zone as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Calendar date from the `YYYY-MM-DD` prefix of a local timestamp.
fn local_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}
