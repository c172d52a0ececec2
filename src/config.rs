// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Every integration is optional: a missing Slack token falls back to
//! log-only notifications, a missing GCP project to the in-memory store,
//! and missing Strava credentials make `/api/strava` answer 503.

use std::env;

/// Default number of recent activities fed to the streak engine.
pub const DEFAULT_STREAK_ACTIVITY_WINDOW: u32 = 30;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// GCP project ID; Firestore is used only when this is set
    pub gcp_project_id: Option<String>,

    // --- Slack ---
    /// Bot token for chat.postMessage
    pub slack_bot_token: Option<String>,
    /// Channel receiving game notifications
    pub slack_channel_id: String,
    /// Signing secret for verifying Events API requests
    pub slack_signing_secret: Option<String>,
    /// Incoming webhook URL for the run status ping
    pub slack_webhook_url: Option<String>,

    // --- Strava ---
    pub strava: Option<StravaCredentials>,
    /// Fixed UTC offset for streak days; derived from activities when unset
    pub streak_utc_offset_minutes: Option<i32>,
    /// How many recent activities to request for streak computation
    pub streak_activity_window: u32,
}

/// Strava OAuth credentials for the site owner's account.
#[derive(Debug, Clone)]
pub struct StravaCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self::test_default()
    }
}

impl Config {
    /// Config with no external integrations, for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            gcp_project_id: None,
            slack_bot_token: None,
            slack_channel_id: "#general".to_string(),
            slack_signing_secret: None,
            slack_webhook_url: None,
            strava: None,
            streak_utc_offset_minutes: None,
            streak_activity_window: DEFAULT_STREAK_ACTIVITY_WINDOW,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let strava = match (
            optional_var("STRAVA_CLIENT_ID"),
            optional_var("STRAVA_CLIENT_SECRET"),
            optional_var("STRAVA_REFRESH_TOKEN"),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Some(StravaCredentials {
                    client_id,
                    client_secret,
                    refresh_token,
                })
            }
            (None, None, None) => None,
            _ => return Err(ConfigError::Incomplete("STRAVA_*")),
        };

        let streak_utc_offset_minutes = optional_var("STREAK_UTC_OFFSET_MINUTES")
            .map(|v| {
                v.parse::<i32>()
                    .map_err(|_| ConfigError::Invalid("STREAK_UTC_OFFSET_MINUTES", v))
            })
            .transpose()?;

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            gcp_project_id: optional_var("GCP_PROJECT_ID"),
            slack_bot_token: optional_var("SLACK_BOT_TOKEN"),
            slack_channel_id: optional_var("SLACK_CHANNEL_ID")
                .unwrap_or_else(|| "#general".to_string()),
            slack_signing_secret: optional_var("SLACK_SIGNING_SECRET"),
            slack_webhook_url: optional_var("SLACK_WEBHOOK_URL"),
            strava,
            streak_utc_offset_minutes,
            streak_activity_window: env::var("STREAK_ACTIVITY_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_STREAK_ACTIVITY_WINDOW),
        })
    }
}

/// Read a variable, treating blank values as unset. Secrets get trimmed.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Incomplete configuration: all of {0} must be set together")]
    Incomplete(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
